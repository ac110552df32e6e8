use graphnet::data::xor_gate;
use graphnet::{Network, TrainConfig};

fn main() -> graphnet::Result<()> {
    tracing_subscriber::fmt::init();

    let mut network = Network::new(&[2, 4, 1])?;
    network.set_learning_rate(0.5)?;

    let dataset = xor_gate();
    let epochs = 50_000;

    graphnet::train_loop(&mut network, &dataset, &TrainConfig::new(epochs).log_every(5_000))?;

    for sample in &dataset {
        println!("Input: {:?} -> Output: {:.4}", sample.input, network.predict(&sample.input)?[0]);
    }
    Ok(())
}
