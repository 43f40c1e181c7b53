mod config_tests;
mod report_parsing_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the library:
// - smoke_tests: The whole pipeline from a report file to a written playbook
// - report_parsing_tests: Reading weekly schedule grids into employee records
// - zone_resolution_tests: Zone lookup per time slot and the rendered colors
// - split_editing_tests: Splitting a shift into zone blocks
// - config_tests: Loading, saving and falling back on configuration
