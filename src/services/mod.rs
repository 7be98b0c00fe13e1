mod generator;

pub use generator::GenerationClient;
