//! One-file-per-task chunking and the HTCondor arguments table.

use super::job::JobSpec;
use crate::error::FsError;
use crate::filelist::FileList;
use crate::fsutil;
use std::fmt;
use std::path::{Path, PathBuf};

pub const ARGUMENTS_FILE: &str = "arguments.txt";
pub const WRAPPER_FILE: &str = "wrapper.sh";
pub const SUBMIT_FILE: &str = "job.sub";

/// Per-job directory `<framework>/condor/<label>`
#[derive(Debug, Clone)]
pub struct JobDir {
    dir: PathBuf,
}

impl JobDir {
    pub fn new(condor_root: &Path, label: &str) -> Self {
        Self {
            dir: condor_root.join(label),
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("chunk_{}.txt", index))
    }

    pub fn arguments_path(&self) -> PathBuf {
        self.dir.join(ARGUMENTS_FILE)
    }

    pub fn wrapper_path(&self) -> PathBuf {
        self.dir.join(WRAPPER_FILE)
    }

    pub fn submit_path(&self) -> PathBuf {
        self.dir.join(SUBMIT_FILE)
    }
}

/// A single input file materialized as its own list file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub path: PathBuf,
    pub input: String,
}

/// One row of the arguments table: `$1..$6` of the wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentsRow {
    pub chunk_path: PathBuf,
    pub output_name: String,
    pub remote_dest: String,
    pub weight: String,
    pub is_data: String,
    pub process: String,
}

impl fmt::Display for ArgumentsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.chunk_path.display(),
            self.output_name,
            self.remote_dest,
            self.weight,
            self.is_data,
            self.process
        )
    }
}

/// Chunks and argument rows for one job, index-aligned
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    pub chunks: Vec<Chunk>,
    pub rows: Vec<ArgumentsRow>,
}

/// Remote destination directory for a job's outputs.
pub fn remote_destination(remote_root: &str, label: &str) -> String {
    format!("{}/{}", remote_root.trim_end_matches('/'), label)
}

/// Plan one chunk per input file, in list order.
pub fn plan_chunks(spec: &JobSpec, files: &FileList, job_dir: &JobDir, remote_root: &str) -> ChunkPlan {
    let remote_dest = remote_destination(remote_root, &spec.label);
    let mut chunks = Vec::with_capacity(files.len());
    let mut rows = Vec::with_capacity(files.len());

    for (index, input) in files.iter().enumerate() {
        let path = job_dir.chunk_path(index);
        rows.push(ArgumentsRow {
            chunk_path: path.clone(),
            output_name: format!("output_{}.root", index),
            remote_dest: remote_dest.clone(),
            weight: spec.weight.clone(),
            is_data: spec.data_flag().to_string(),
            process: spec.process.clone(),
        });
        chunks.push(Chunk {
            index,
            path,
            input: input.clone(),
        });
    }

    ChunkPlan { chunks, rows }
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn arguments_table(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            text.push_str(&row.to_string());
            text.push('\n');
        }
        text
    }

    /// Write every chunk file and the arguments table into `job_dir`.
    pub fn write(&self, job_dir: &JobDir) -> Result<(), FsError> {
        for chunk in &self.chunks {
            FileList::new(vec![chunk.input.clone()]).write(&chunk.path)?;
        }
        fsutil::write(&job_dir.arguments_path(), self.arguments_table())
    }
}
