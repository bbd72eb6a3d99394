use clap::{Parser, Subcommand};
use log::info;
use std::io::Write;
use seqlearn::{
    error::Result,
    features::{Alphabet, WordFeatures},
    hmm::{LinearHMM, LinearHMMModel, LinearHMMParams},
    io::{fasta, matrix},
    kernel::{CustomKernel, Kernel},
};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train a linear HMM on fixed-length sequences
    Train {
        /// Input FASTA filename. Every record must have the same length.
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Output model (json) filename
        #[clap(short, long)]
        output: std::path::PathBuf,
        /// Order of words. Order k models each symbol given the k-1 previous ones.
        #[clap(short = 'k', default_value_t = 1)]
        order: usize,
        /// Pseudo count added to every (position, symbol) count
        #[clap(short = 'p', default_value_t = LinearHMMParams::default().pseudo_count)]
        pseudo_count: f64,
        /// Alphabet: `dna`, `protein` or the characters themselves
        #[clap(short, long, default_value = "dna")]
        alphabet: String,
    },
    /// Print log likelihood of each record under a trained model
    Score {
        /// Model (json) filename
        #[clap(short, long)]
        model: std::path::PathBuf,
        /// Input FASTA filename
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Alphabet used in training
        #[clap(short, long, default_value = "dna")]
        alphabet: String,
    },
    /// Sample sequences from a trained model
    Sample {
        /// Model (json) filename
        #[clap(short, long)]
        model: std::path::PathBuf,
        /// Number of sequences
        #[clap(short, default_value_t = 1)]
        n: usize,
        /// Seed of the random generator
        #[clap(short, long, default_value_t = 0)]
        seed: u64,
        /// Alphabet used in training
        #[clap(short, long, default_value = "dna")]
        alphabet: String,
    },
    /// Pack a symmetric square matrix into a custom kernel blob
    Kernel {
        /// Whitespace separated square matrix
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Output binary filename
        #[clap(short, long)]
        output: std::path::PathBuf,
    },
}

fn parse_alphabet(name: &str) -> Result<Alphabet> {
    match name {
        "dna" => Ok(Alphabet::dna()),
        "protein" => Ok(Alphabet::protein()),
        chars => Alphabet::new(chars.as_bytes()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("opts={:?}", opts);
    match &opts.command {
        Commands::Train {
            input,
            output,
            order,
            pseudo_count,
            alphabet,
        } => {
            let alphabet = parse_alphabet(alphabet)?;
            let records = fasta::parse_records_from_file(input)?;
            info!("n_records={}", records.len());
            let features = WordFeatures::from_sequences(
                records.iter().map(|(_, seq)| seq),
                &alphabet,
                *order,
            )?;
            let mut hmm = LinearHMM::from_features(&features);
            hmm.train_with(&LinearHMMParams::new(*pseudo_count), None)?;
            let mut model = hmm.to_model()?;
            model.order = *order;
            model.to_file(output)?;
        }
        Commands::Score {
            model,
            input,
            alphabet,
        } => {
            let alphabet = parse_alphabet(alphabet)?;
            let model = LinearHMMModel::from_file(model)?;
            let records = fasta::parse_records_from_file(input)?;
            let features = WordFeatures::from_sequences(
                records.iter().map(|(_, seq)| seq),
                &alphabet,
                model.order,
            )?;
            let mut hmm = LinearHMM::from_model(&model)?;
            if !records.is_empty() {
                hmm.set_features(&features)?;
            }
            for (i, (id, _)) in records.iter().enumerate() {
                println!("{}\t{}", id, hmm.log_likelihood_example(i)?);
            }
        }
        Commands::Sample {
            model,
            n,
            seed,
            alphabet,
        } => {
            let alphabet = parse_alphabet(alphabet)?;
            let model = LinearHMMModel::from_file(model)?;
            let hmm = LinearHMM::from_model(&model)?;
            let samples = hmm.sample_many_bases(*n, model.order, alphabet.len(), *seed)?;
            for (i, bases) in samples.iter().enumerate() {
                println!(">sample{}", i);
                let s: String = bases
                    .iter()
                    .map(|&x| alphabet.decode(x).map_or('?', |c| c as char))
                    .collect();
                println!("{}", s);
            }
        }
        Commands::Kernel { input, output } => {
            let (m, n) = matrix::parse_square_from_file(input)?;
            let mut kernel = CustomKernel::new();
            kernel.set_matrix_from_square(&m, n)?;
            let mut file = std::io::BufWriter::new(std::fs::File::create(output)?);
            kernel.save_init(&mut file)?;
            file.flush()?;
            info!(
                "packed {}x{} matrix into {} values",
                n,
                n,
                kernel.packed().len()
            );
        }
    }
    Ok(())
}
