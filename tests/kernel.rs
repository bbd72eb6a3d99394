//!
//! test of custom kernel
//!
use seqlearn::prelude::*;
use std::rc::Rc;

#[derive(Debug)]
struct Label(usize);

impl LatentData for Label {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn gram(n: usize) -> Vec<f64> {
    // k(i, j) = min(i, j) + 1 (brownian motion kernel)
    (0..n * n)
        .map(|x| ((x / n).min(x % n) + 1) as f64)
        .collect()
}

#[test]
fn custom_kernel_symmetric_lookup() {
    for n in 1..=6 {
        let mut k = CustomKernel::new();
        k.set_matrix_from_square(&gram(n), n).unwrap();
        for i in 0..n {
            for j in 0..n {
                assert_eq!(k.compute(i, j).unwrap(), k.compute(j, i).unwrap());
                assert_eq!(k.compute(i, j).unwrap(), (i.min(j) + 1) as f64);
            }
        }
    }
}

#[test]
fn custom_kernel_on_latent_features() {
    let mut k = CustomKernel::new();
    k.set_matrix_from_square(&gram(4), 4).unwrap();

    let mut f = LatentFeatures::new();
    for i in 0..3 {
        f.add_sample(Rc::new(Label(i)));
    }
    k.init(&f, &f, true).unwrap();
    let km = k.kernel_matrix().unwrap();
    assert_eq!(km.len(), 3);
    assert_eq!(km[2], vec![1.0, 2.0, 3.0]);
    assert!(f.get_sample(3).is_err());
}

#[test]
fn custom_kernel_blob_file_round_trip() {
    let mut k = CustomKernel::new();
    k.set_matrix_from_triangle(&[1.0, 0.25, 0.5, 2.0, 0.75, 3.0], 3)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel.bin");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        k.save_init(&mut file).unwrap();
    }
    let mut loaded = CustomKernel::new();
    let mut file = std::fs::File::open(&path).unwrap();
    loaded.load_init(&mut file).unwrap();
    assert_eq!(loaded, k);
    assert_eq!(loaded.compute(2, 1).unwrap(), 0.75);
}
