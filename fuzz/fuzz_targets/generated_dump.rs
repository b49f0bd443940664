//! Structured fuzzer: generated dumps must parse back into their own rows.

use honggfuzz::fuzz;
use sqldump_rows::testing::{GeneratedDump, test_generated_dump};

fn main() {
    loop {
        fuzz!(|dump: GeneratedDump| {
            test_generated_dump(&dump);
        });
    }
}
