//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources (global file, workspace file, environment) override these keys.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("resolver.query_program", "dasgoclient")?
        .set_default("resolver.redirector", "global")?
        .set_default("resolver.output", "file_list.txt")?
        .set_default("resolver.preview", 3)?
        .set_default("scaffold.tree", "Events")?
        .set_default("scaffold.class_name", "CMSAnalyzer")?
        .set_default("scaffold.variant", "advanced")?
        .set_default("scaffold.root_program", "root")?
        .set_default("scaffold.executable", "runAnalysis")?
        .set_default("submit.env_setup", "/cvmfs/cms.cern.ch/cmsset_default.sh")?
        .set_default("submit.runtime_setup", "eval $(scramv1 runtime -sh)")?
        .set_default("submit.storage_endpoint", "root://eosuser.cern.ch/")?
        .set_default("submit.upload_program", "xrdcp")?
        .set_default("submit.job_flavour", "tomorrow")?
        .set_default("submit.submit_program", "condor_submit")
}
