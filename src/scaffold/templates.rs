//! Source templates for generated analysis frameworks.
//!
//! One parameterized template per artifact; variants differ only in the
//! parameters they pass (layout, overrides, injected fields, loop body).

use super::header::{FieldDecl, HeaderSkeleton};
use chrono::{DateTime, Utc};
use indoc::formatdoc;

/// Output file member injected into advanced headers
pub const OUTPUT_FIELD: &str = "fOutputFileName";

/// Fields injected into the public section of advanced headers.
pub fn user_fields() -> Vec<FieldDecl> {
    vec![
        FieldDecl::new("float", "fWeight", "1.0"),
        FieldDecl::new("bool", "fIsData", "false"),
        FieldDecl::new("TString", "fProcess", "\"\""),
        FieldDecl::new("TString", OUTPUT_FIELD, "\"output.root\""),
    ]
}

/// One 1-D histogram filled from a per-object branch
#[derive(Debug, Clone)]
pub struct HistogramSpec {
    /// Branch suffix: `pt`, `eta`, `phi`
    pub variable: &'static str,
    /// Quantity in the histogram title, e.g. `p_{T}`
    pub label: &'static str,
    /// ROOT axis label, e.g. `p_{T} (GeV)`
    pub axis: &'static str,
    pub bins: u32,
    pub low: f64,
    pub high: f64,
}

/// A NanoAOD object collection (`nMuon`, `Muon_pt[]`, ...) with a pT cut
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: &'static str,
    /// Histogram name stem, e.g. `mu` for `h_mu_pt`
    pub short: &'static str,
    pub pt_threshold: f64,
    pub histograms: Vec<HistogramSpec>,
}

impl CollectionSpec {
    pub fn counter(&self) -> String {
        format!("n{}", self.name)
    }

    pub fn branch(&self, variable: &str) -> String {
        format!("{}_{}", self.name, variable)
    }

    /// A collection is usable when the header declares its counter, `pt`, and every filled branch.
    pub fn is_declared_in(&self, header: &HeaderSkeleton) -> bool {
        header.declares(&self.counter())
            && header.declares(&self.branch("pt"))
            && self
                .histograms
                .iter()
                .all(|h| header.declares(&self.branch(h.variable)))
    }

    fn histogram_name(&self, variable: &str) -> String {
        format!("h_{}_{}", self.short, variable)
    }

    fn declarations(&self) -> String {
        let mut out = String::new();
        for h in &self.histograms {
            let name = self.histogram_name(h.variable);
            out.push_str(&format!(
                "   TH1F *{name} = new TH1F(\"{name}\", \"{coll} {label};{axis};Events\", {bins}, {low:.1}, {high:.1});\n",
                name = name,
                coll = self.name,
                label = h.label,
                axis = h.axis,
                bins = h.bins,
                low = h.low,
                high = h.high,
            ));
        }
        out
    }

    fn loop_block(&self) -> String {
        let mut out = format!(
            "      // --- {name} loop ---\n      for (UInt_t i = 0; i < {counter}; i++) {{\n         if ({pt}[i] <= {cut:.1}) continue;\n",
            name = self.name,
            counter = self.counter(),
            pt = self.branch("pt"),
            cut = self.pt_threshold,
        );
        for h in &self.histograms {
            out.push_str(&format!(
                "         {}->Fill({}[i], w);\n",
                self.histogram_name(h.variable),
                self.branch(h.variable)
            ));
        }
        out.push_str("      }\n");
        out
    }
}

fn kinematics(angular_bins: u32) -> Vec<HistogramSpec> {
    vec![
        HistogramSpec {
            variable: "pt",
            label: "p_{T}",
            axis: "p_{T} (GeV)",
            bins: 200,
            low: 0.0,
            high: 2000.0,
        },
        HistogramSpec {
            variable: "eta",
            label: "#eta",
            axis: "#eta",
            bins: angular_bins,
            low: -5.0,
            high: 5.0,
        },
        HistogramSpec {
            variable: "phi",
            label: "#phi",
            axis: "#phi",
            bins: angular_bins,
            low: -5.0,
            high: 5.0,
        },
    ]
}

/// Muons and electrons above 10 GeV, jets above 30 GeV.
pub fn default_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec {
            name: "Muon",
            short: "mu",
            pt_threshold: 10.0,
            histograms: kinematics(60),
        },
        CollectionSpec {
            name: "Electron",
            short: "ele",
            pt_threshold: 10.0,
            histograms: kinematics(100),
        },
        CollectionSpec {
            name: "Jet",
            short: "jet",
            pt_threshold: 30.0,
            histograms: kinematics(100),
        },
    ]
}

/// Replacement `Loop()` implementation for advanced frameworks
#[derive(Debug, Clone)]
pub struct AnalysisSource<'a> {
    pub class_name: &'a str,
    pub collections: &'a [CollectionSpec],
}

impl AnalysisSource<'_> {
    pub fn render(&self) -> String {
        let histograms: String = self.collections.iter().map(|c| c.declarations()).collect();
        let loops: String = self.collections.iter().map(|c| c.loop_block()).collect();

        formatdoc! {r#"
            #define {class}_cxx
            #include "{class}.h"
            #include <TH1.h>
            #include <TFile.h>
            #include <iostream>

            void {class}::Loop()
            {{
               if (fChain == 0) return;

               Long64_t nentries = fChain->GetEntriesFast();

               std::cout << "[Analyzer] Output File: " << {output} << std::endl;
               TFile *f_out = new TFile({output}, "RECREATE");

            {histograms}
               std::cout << "[Analyzer] Info: " << fProcess << " | Weight: " << fWeight << " | IsData: " << fIsData << std::endl;

               Long64_t nbytes = 0, nb = 0;
               for (Long64_t jentry = 0; jentry < nentries; jentry++) {{
                  Long64_t ientry = LoadTree(jentry);
                  if (ientry < 0) break;
                  nb = fChain->GetEntry(jentry);   nbytes += nb;

                  if (jentry % 10000 == 0) std::cout << "Processing Entry " << jentry << " / " << nentries << std::endl;

                  float w = fIsData ? 1.0 : fWeight;

            {loops}   }}

               f_out->Write();
               f_out->Close();
               std::cout << "[Analyzer] Finished." << std::endl;
            }}
        "#,
            class = self.class_name,
            output = OUTPUT_FIELD,
            histograms = histograms,
            loops = loops,
        }
    }
}

/// Entry point that chains the listed files and runs the analyzer
#[derive(Debug, Clone)]
pub struct MainProgram<'a> {
    pub class_name: &'a str,
    pub tree: &'a str,
    /// Accept `[output] [weight] [isData] [process]` after the list file
    pub overrides: bool,
}

impl MainProgram<'_> {
    pub fn render(&self) -> String {
        let (usage, parse, apply) = if self.overrides {
            (
                "<file_list> [output] [weight] [isData] [process]",
                concat!(
                    "    std::string outFileName  = (argc > 2) ? argv[2] : \"output.root\";\n",
                    "    float weight             = (argc > 3) ? atof(argv[3]) : 1.0;\n",
                    "    bool isData              = (argc > 4) ? (atoi(argv[4]) != 0) : false;\n",
                    "    std::string process      = (argc > 5) ? argv[5] : \"Unknown\";\n",
                ),
                concat!(
                    "    t.fOutputFileName = outFileName;\n",
                    "    t.fWeight = weight;\n",
                    "    t.fIsData = isData;\n",
                    "    t.fProcess = process;\n",
                ),
            )
        } else {
            ("<file_list.txt>", "", "")
        };

        formatdoc! {r#"
            /**
             * @file main.cc
             * @brief Driver for {class}
             */
            #include "{class}.h"
            #include <cstdlib>
            #include <fstream>
            #include <iostream>
            #include <string>
            #include "TChain.h"

            int main(int argc, char* argv[]) {{
                if (argc < 2) {{
                    std::cout << "Usage: " << argv[0] << " {usage}" << std::endl;
                    return 1;
                }}

                std::string listFileName = argv[1];
            {parse}
                TChain *chain = new TChain("{tree}");
                std::ifstream infile(listFileName);
                if (!infile.is_open()) {{
                    std::cout << "[Error] Cannot open file list: " << listFileName << std::endl;
                    return 1;
                }}

                std::string line;
                int nFiles = 0;
                while (std::getline(infile, line)) {{
                    if (line.empty() || line[0] == '#') continue;
                    chain->Add(line.c_str());
                    nFiles++;
                }}
                if (nFiles == 0) {{
                    std::cout << "[Warning] No files added to chain." << std::endl;
                }}
                std::cout << "[Main] Total " << nFiles << " files added to TChain." << std::endl;

                {class} t(chain);
            {apply}
                std::cout << "[Main] Starting Event Loop..." << std::endl;
                t.Loop();
                std::cout << "[Main] Analysis Finished." << std::endl;
                return 0;
            }}
        "#,
            class = self.class_name,
            tree = self.tree,
            usage = usage,
            parse = parse,
            apply = apply,
        }
    }
}

/// Makefile for the generated framework
#[derive(Debug, Clone)]
pub struct BuildScript<'a> {
    pub class_name: &'a str,
    pub executable: &'a str,
    /// `include/` + `src/` layout instead of a flat directory
    pub structured: bool,
    pub generated_at: DateTime<Utc>,
}

impl BuildScript<'_> {
    pub fn render(&self) -> String {
        let (inc, source, object_rule, clean) = if self.structured {
            (
                "INC = -Iinclude",
                format!("src/{}.C", self.class_name),
                "src/%.o: src/%.C",
                "rm -f *.o src/*.o $(TARGET)",
            )
        } else {
            (
                "INC = -I.",
                format!("{}.C", self.class_name),
                "%.o: %.C",
                "rm -f *.o $(TARGET)",
            )
        };

        // Recipe lines must start with a tab.
        let lines = [
            format!(
                "# Generated by anagen for {} on {}",
                self.class_name,
                self.generated_at.format("%Y-%m-%d %H:%M UTC")
            ),
            String::new(),
            "CXX = g++".to_string(),
            inc.to_string(),
            "CXXFLAGS = -O2 -Wall -fPIC $(shell root-config --cflags) $(INC)".to_string(),
            "LDFLAGS = $(shell root-config --libs)".to_string(),
            format!("TARGET = {}", self.executable),
            String::new(),
            format!("SRCS = main.cc {}", source),
            "OBJS = $(SRCS:.cc=.o)".to_string(),
            "OBJS := $(OBJS:.C=.o)".to_string(),
            String::new(),
            "all: $(TARGET)".to_string(),
            String::new(),
            "$(TARGET): $(OBJS)".to_string(),
            "\t$(CXX) -o $@ $^ $(LDFLAGS)".to_string(),
            String::new(),
            "%.o: %.cc".to_string(),
            "\t$(CXX) $(CXXFLAGS) -c $< -o $@".to_string(),
            String::new(),
            object_rule.to_string(),
            "\t$(CXX) $(CXXFLAGS) -c $< -o $@".to_string(),
            String::new(),
            "clean:".to_string(),
            format!("\t{}", clean),
        ];

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
