#![no_main]

//! Scenario parser fuzzer.
//!
//! Any text either fails to load or builds a map that satisfies the
//! ownership invariants.

use libfuzzer_sys::fuzz_target;
use mule::game::check_invariants;
use mule::{Scenario, SimulationConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(scenario) = Scenario::from_json(text) else {
        return;
    };
    if let Ok((map, _)) = scenario.build(&SimulationConfig::default()) {
        assert!(check_invariants(&map).is_empty());
    }
});
