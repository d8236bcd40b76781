#![no_main]

use crop_yield_advisor::analysis::{Advisor, FixedVariability};
use crop_yield_advisor::io::read_plans_json_from_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(plans) = read_plans_json_from_bytes(data) {
        let mut advisor = Advisor::new(Box::new(FixedVariability::neutral()), 3);
        let results = advisor.predict_batch(&plans);
        assert_eq!(results.len(), plans.len());
    }
});
