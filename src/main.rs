use rand::rngs::StdRng;
use rand::SeedableRng;

use sketchnet::{train, Annotation, Matrix, Network, NnError, TrainConfig};

/// Tiny two-class demo: points near (0,0) are class 0, points near
/// (1,1) are class 1. Real feature/label matrices come from an
/// external loader; this stands in for it.
fn toy_dataset() -> Vec<Annotation> {
    let samples = [
        ([0.05, 0.10], 0),
        ([0.15, 0.05], 0),
        ([0.10, 0.20], 0),
        ([0.00, 0.05], 0),
        ([0.90, 0.95], 1),
        ([0.85, 1.00], 1),
        ([0.95, 0.90], 1),
        ([1.00, 0.85], 1),
    ];
    samples
        .iter()
        .map(|&(features, class)| {
            let mut label = vec![0.0; 2];
            label[class] = 1.0;
            Annotation::new(
                Matrix::column_vector(features.to_vec()),
                Matrix::column_vector(label),
            )
        })
        .collect()
}

fn run() -> Result<(), NnError> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut network = Network::new(2, &[4, 2], &mut rng)?;

    let dataset = toy_dataset();
    let config = TrainConfig::new(300, 4, 0.5, 0.01);
    let history = train(&mut network, &dataset, &dataset, &config, &mut rng)?;

    if let Some(last) = history.last() {
        println!(
            "after {} epochs: cost {:.5}, accuracy {:.2}",
            last.epoch, last.train_cost, last.train_accuracy
        );
    }
    for p in network.predict(&dataset)? {
        println!("label {} -> predicted {}", p.label, p.predicted);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("training failed: {e}");
        std::process::exit(1);
    }
}
