use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use devkit_props::source::{self, FsSource, SdkQuery};
use devkit_props::{IdeaSdkProperties, PluginModuleProperties};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read and update DevKit SDK and plugin module properties", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the properties of an IDEA SDK as JSON
    Sdk {
        /// jdk.table.xml, or a file holding a bare <additional> element
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Pick the IDEA SDK with this name when the table lists several
        #[arg(long)]
        name: Option<String>,
        /// SDK home path; defaults to the entry's <homePath>
        #[arg(long)]
        home: Option<String>,
        /// SDK version string; defaults to the entry's <version>
        #[arg(long = "sdk-version")]
        sdk_version: Option<String>,
    },
    /// Write IDEA SDK properties into an XML file
    SetSdk {
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,
        /// Pick the IDEA SDK with this name when the table lists several
        #[arg(long)]
        name: Option<String>,
        /// Sandbox directory; omitted clears the field
        #[arg(long)]
        sandbox: Option<String>,
        /// JDK name; omitted writes an empty `sdk` attribute
        #[arg(long)]
        jdk: Option<String>,
    },
    /// Print the build properties of a plugin module (.iml) as JSON
    Module {
        #[arg(value_name = "MODULE_FILE")]
        file: Utf8PathBuf,
    },
    /// Update the build properties of a plugin module (.iml)
    SetModule {
        #[arg(value_name = "MODULE_FILE")]
        file: Utf8PathBuf,
        /// plugin.xml URL; omitted leaves the current value
        #[arg(long)]
        url: Option<String>,
        /// Manifest URL; omitted leaves the current value
        #[arg(long)]
        manifest: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut fs = FsSource;

    match cli.command {
        Command::Sdk {
            file,
            name,
            home,
            sdk_version,
        } => {
            let query = SdkQuery {
                name: name.as_deref(),
                home_path: home.as_deref(),
                version: sdk_version.as_deref(),
            };
            let props = source::load_sdk_file(&mut fs, &file, query)?;
            println!("{}", serde_json::to_string_pretty(&props)?);
        }
        Command::SetSdk {
            file,
            name,
            sandbox,
            jdk,
        } => {
            // home path and version are not stored in the additional data
            let props = IdeaSdkProperties::new("", "", sandbox, jdk);
            source::save_sdk_file(&mut fs, &file, name.as_deref(), &props)?;
        }
        Command::Module { file } => {
            let props = source::load_module_file(&mut fs, &file)?;
            println!("{}", serde_json::to_string_pretty(&props)?);
        }
        Command::SetModule {
            file,
            url,
            manifest,
        } => {
            let update = PluginModuleProperties::new(url, manifest);
            source::update_module_file(&mut fs, &file, &update)?;
        }
    }
    Ok(())
}
