//! Resolver output mirrors the query tokens.

use anagen::resolver::{prefix_entries, GLOBAL_REDIRECTOR};
use proptest::prelude::*;

#[test]
fn test_every_token_is_prefixed_in_order() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let tokens = prop::collection::vec("/store/[A-Za-z0-9_]{1,16}\\.root", 0..30);
    let separators = prop::collection::vec(prop::sample::select(vec![" ", "\n", "\t", "\n\n"]), 30);

    runner
        .run(&(tokens, separators), |(tokens, separators)| {
            let mut raw = String::new();
            for (token, sep) in tokens.iter().zip(separators.iter()) {
                raw.push_str(token);
                raw.push_str(sep);
            }

            let list = prefix_entries(GLOBAL_REDIRECTOR, &raw);
            prop_assert_eq!(list.len(), tokens.len());
            for (entry, token) in list.iter().zip(&tokens) {
                prop_assert_eq!(entry, &format!("{}{}", GLOBAL_REDIRECTOR, token));
            }
            Ok(())
        })
        .unwrap();
}
