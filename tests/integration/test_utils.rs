//! Shared test utilities for integration tests
//!
//! Fake external tools: a catalog query with canned output, a MakeClass stand-in that
//! writes a realistic skeleton, and a cluster client that records submissions.

use anagen::batch::ClusterClient;
use anagen::error::ToolError;
use anagen::resolver::CatalogQuery;
use anagen::scaffold::{GeneratedSkeleton, SkeletonGenerator, TableInfo};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Header in the shape `TTree::MakeClass` emits for a NanoAOD tree
pub fn makeclass_header(class_name: &str) -> String {
    format!(
        "\
//////////////////////////////////////////////////////////
// This class has been automatically generated on
// Thu Oct 16 10:00:00 2026 by ROOT version 6.30/04
//////////////////////////////////////////////////////////

#ifndef {class}_h
#define {class}_h

#include <TROOT.h>
#include <TChain.h>
#include <TFile.h>

class {class} {{
public :
   TTree          *fChain;   //!pointer to the analyzed TTree or TChain
   Int_t           fCurrent; //!current Tree number in a TChain

   // Declaration of leaf types
   UInt_t          run;
   UInt_t          nMuon;
   Float_t         Muon_pt[12];   //[nMuon]
   Float_t         Muon_eta[12];   //[nMuon]
   Float_t         Muon_phi[12];   //[nMuon]
   Int_t           nJet;
   Float_t         Jet_pt[40];   //[nJet]

   // List of branches
   TBranch        *b_run;   //!
   TBranch        *b_nMuon;   //!

   {class}(TTree *tree=0);
   virtual ~{class}();
   virtual Int_t    GetEntry(Long64_t entry);
   virtual void     Init(TTree *tree);
   virtual void     Loop();
}};

#endif
",
        class = class_name
    )
}

pub fn makeclass_source(class_name: &str) -> String {
    format!(
        "#define {class}_cxx\n#include \"{class}.h\"\n\nvoid {class}::Loop()\n{{\n   if (fChain == 0) return;\n}}\n",
        class = class_name
    )
}

/// Stands in for ROOT: the sample must exist and only the `Events` tree is present.
pub struct FakeMakeClass {
    pub entries: u64,
}

impl SkeletonGenerator for FakeMakeClass {
    fn inspect(&self, sample: &Path, tree: &str) -> Result<TableInfo, ToolError> {
        if !sample.is_file() {
            return Err(ToolError::SampleOpen(sample.to_path_buf()));
        }
        if tree != "Events" {
            return Err(ToolError::TableNotFound(tree.to_string()));
        }
        Ok(TableInfo {
            entries: Some(self.entries),
        })
    }

    fn generate(
        &self,
        sample: &Path,
        tree: &str,
        class_name: &str,
        work_dir: &Path,
    ) -> Result<GeneratedSkeleton, ToolError> {
        self.inspect(sample, tree)?;
        let header = work_dir.join(format!("{}.h", class_name));
        let source = work_dir.join(format!("{}.C", class_name));
        std::fs::write(&header, makeclass_header(class_name)).unwrap();
        std::fs::write(&source, makeclass_source(class_name)).unwrap();
        Ok(GeneratedSkeleton { header, source })
    }
}

/// Generator that claims success without writing anything
pub struct SilentGenerator;

impl SkeletonGenerator for SilentGenerator {
    fn inspect(&self, _sample: &Path, _tree: &str) -> Result<TableInfo, ToolError> {
        Ok(TableInfo { entries: None })
    }

    fn generate(
        &self,
        _sample: &Path,
        _tree: &str,
        class_name: &str,
        work_dir: &Path,
    ) -> Result<GeneratedSkeleton, ToolError> {
        Ok(GeneratedSkeleton {
            header: work_dir.join(format!("{}.h", class_name)),
            source: work_dir.join(format!("{}.C", class_name)),
        })
    }
}

pub struct CannedQuery(pub &'static str);

impl CatalogQuery for CannedQuery {
    fn query(&self, _dataset: &str) -> Result<String, ToolError> {
        Ok(self.0.to_string())
    }
}

#[derive(Default)]
pub struct RecordingCluster {
    pub submitted: RefCell<Vec<PathBuf>>,
}

impl ClusterClient for &RecordingCluster {
    fn submit(&self, submit_file: &Path) -> Result<Option<i32>, String> {
        self.submitted.borrow_mut().push(submit_file.to_path_buf());
        Ok(Some(0))
    }
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
