/// reference values, crossover temperature, diagram and property tables of the reference scenario
pub mod reduction_examples;
