mod boundary_scenario;
mod properties;
