//!
//! Latent features: task-specific side information per training example
//!
use crate::error::{check_index, Result};
use crate::features::{FeatureClass, FeatureType, Features};
use std::any::Any;
use std::rc::Rc;

///
/// Opaque latent data attached to one example.
///
/// Implementors are downcast back to their concrete type through `as_any`.
///
pub trait LatentData: std::fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn get_name(&self) -> &str {
        "LatentData"
    }
}

///
/// Append-only collection of shared latent data handles.
///
/// The collection holds one handle of each item, `get_sample` hands out
/// another.
///
#[derive(Clone, Debug, Default)]
pub struct LatentFeatures {
    samples: Vec<Rc<dyn LatentData>>,
}

impl LatentFeatures {
    pub fn new() -> Self {
        LatentFeatures {
            samples: Vec::new(),
        }
    }
    ///
    /// empty collection with room for `num_samples` items
    ///
    pub fn with_capacity(num_samples: usize) -> Self {
        LatentFeatures {
            samples: Vec::with_capacity(num_samples),
        }
    }
    pub fn add_sample(&mut self, example: Rc<dyn LatentData>) {
        self.samples.push(example);
    }
    pub fn get_sample(&self, index: usize) -> Result<Rc<dyn LatentData>> {
        check_index(index, self.samples.len())?;
        Ok(Rc::clone(&self.samples[index]))
    }
    ///
    /// size in bytes of one element
    ///
    pub fn get_size(&self) -> usize {
        std::mem::size_of::<f64>()
    }
    ///
    /// copy of the collection sharing the same items
    ///
    pub fn duplicate(&self) -> Self {
        self.clone()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn LatentData>> + '_ {
        self.samples.iter()
    }
}

impl Features for LatentFeatures {
    fn get_num_vectors(&self) -> usize {
        self.samples.len()
    }
    fn get_feature_type(&self) -> FeatureType {
        FeatureType::Any
    }
    fn get_feature_class(&self) -> FeatureClass {
        FeatureClass::Latent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug, PartialEq)]
    struct BoundingBox {
        x: usize,
        y: usize,
    }
    impl LatentData for BoundingBox {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn get_name(&self) -> &str {
            "BoundingBox"
        }
    }

    #[test]
    fn latent_features_add_get() {
        let mut f = LatentFeatures::with_capacity(2);
        assert_eq!(f.get_num_vectors(), 0);
        f.add_sample(Rc::new(BoundingBox { x: 1, y: 2 }));
        f.add_sample(Rc::new(BoundingBox { x: 3, y: 4 }));
        f.add_sample(Rc::new(BoundingBox { x: 5, y: 6 }));
        assert_eq!(f.get_num_vectors(), 3);

        let s = f.get_sample(1).unwrap();
        assert_eq!(s.get_name(), "BoundingBox");
        let b = s.as_any().downcast_ref::<BoundingBox>().unwrap();
        assert_eq!(b, &BoundingBox { x: 3, y: 4 });

        match f.get_sample(3) {
            Err(Error::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 3);
                assert_eq!(len, 3);
            }
            r => panic!("unexpected {:?}", r),
        }
        assert_eq!(f.get_feature_type(), FeatureType::Any);
        assert_eq!(f.get_feature_class(), FeatureClass::Latent);
        assert_eq!(f.get_size(), 8);
    }
    #[test]
    fn latent_features_shared_handles() {
        let item: Rc<dyn LatentData> = Rc::new(BoundingBox { x: 0, y: 0 });
        let mut f = LatentFeatures::new();
        f.add_sample(Rc::clone(&item));
        assert_eq!(Rc::strong_count(&item), 2);

        let g = f.duplicate();
        assert_eq!(g.get_num_vectors(), 1);
        assert_eq!(Rc::strong_count(&item), 3);
        let s = g.get_sample(0).unwrap();
        assert!(Rc::ptr_eq(&s, &item));
        drop(s);
        drop(f);
        assert_eq!(Rc::strong_count(&item), 2);
    }
}
