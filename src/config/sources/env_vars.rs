//! Environment source: ANAGEN_<SECTION>__<KEY>, e.g. ANAGEN_SCAFFOLD__TREE=Events

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("ANAGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
