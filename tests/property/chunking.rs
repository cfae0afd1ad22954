//! Chunk plans cover every input exactly once.

use anagen::batch::{plan_chunks, JobDir, JobFormat, JobSpec};
use anagen::filelist::FileList;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

fn entries() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("/store/[a-z]{1,8}/[a-z0-9]{1,12}\\.root", 0..40)
        .prop_map(|set| set.into_iter().collect())
}

#[test]
fn test_one_chunk_and_row_per_input() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&entries(), |inputs| {
            let spec = JobSpec::parse_line("list.txt job 0.25 1 Data", JobFormat::Full).unwrap();
            let files = FileList::new(inputs.clone());
            let job_dir = JobDir::new(Path::new("/fw/condor"), "job");
            let plan = plan_chunks(&spec, &files, &job_dir, "/eos/out");

            prop_assert_eq!(plan.chunks.len(), inputs.len());
            prop_assert_eq!(plan.arguments_table().lines().count(), inputs.len());

            let chunk_paths: BTreeSet<_> = plan.chunks.iter().map(|c| c.path.clone()).collect();
            prop_assert_eq!(chunk_paths.len(), inputs.len());

            let covered: BTreeSet<String> = plan.chunks.iter().map(|c| c.input.clone()).collect();
            let expected: BTreeSet<String> = inputs.iter().cloned().collect();
            prop_assert_eq!(covered, expected);

            for (chunk, row) in plan.chunks.iter().zip(&plan.rows) {
                prop_assert_eq!(&chunk.path, &row.chunk_path);
                let rendered = row.to_string();
                prop_assert!(rendered.ends_with(" 0.25 1 Data"));
            }
            Ok(())
        })
        .unwrap();
}
