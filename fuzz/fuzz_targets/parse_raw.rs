//! Raw-text fuzzer for the dump parser.
//!
//! Arbitrary bytes must never panic the parser, and the in-memory and
//! streaming entry points must agree on every input.

use honggfuzz::fuzz;
use sqldump_rows::testing::test_parse_raw;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            test_parse_raw(data);
        });
    }
}
