pub mod json_scenario_reader;
