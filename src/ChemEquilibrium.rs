/// reactions of the H2 reduction of iron oxides: terms, built-in steps, equation parser, dG and ln K
pub mod Reactions;
/// tests
pub mod Reactions_tests;
/// dG and ln K of the four reduction steps over temperature, FeO crossover function and Tc
pub mod ReductionEquilibrium;
/// full diagram data set with display partition, JSON export and tables
pub mod ReductionDiagram;
