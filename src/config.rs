use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};

macro_rules! config_structs {
    {
        $(
            $( #[config_opt($attr:meta)] )*
            pub $name:ident: $typ:ty,
        )*
        $(
            #[config_alias($atarget:ident = $avalue:expr)]
            $( #[config_opt($aattr:meta)] )*
            pub $aname:ident: bool,
        )*
    } => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Config {
            $( pub $name: $typ, )*
        }

        #[derive(Args, Deserialize, Default, Debug)]
        #[serde(deny_unknown_fields)]
        pub struct ConfigOpt {
            $( $( #[$aattr] )* #[serde(skip)] pub $aname: bool, )*
            $( $( #[$attr] )* pub $name: Option<$typ>, )*
        }

        impl Config {
            pub fn update(self, mut opt: ConfigOpt) -> Config {
                $(
                    if opt.$aname {
                        opt.$atarget = Some($avalue);
                    }
                )*
                Config {
                    $( $name: opt.$name.unwrap_or(self.$name), )*
                }
            }
        }
    }
}

config_structs! {
    #[config_opt(arg(long, require_equals = true, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL", group = "reformat_group"))]
    pub reformat: bool,

    #[config_opt(arg(long, value_name = "COMMAND"))]
    pub reformat_command: String,

    #[config_opt(arg(long, value_name = "STYLE"))]
    pub reformat_style: String,

    #[config_opt(arg(short, long, value_name = "DIR"))]
    pub output_dir: PathBuf,

    #[config_alias(reformat = false)]
    #[config_opt(arg(long, group = "reformat_group"))]
    pub no_reformat: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            reformat: true,
            reformat_command: "clang-format-15".to_owned(),
            reformat_style:
                "{BasedOnStyle: llvm, BreakBeforeBraces: Allman, ColumnLimit: 10000, AllowShortFunctionsOnASingleLine: None}"
                    .to_owned(),
            output_dir: PathBuf::from("."),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("debloat-align").join("config.toml"))
}

pub fn parse_config_file(content: &str) -> Result<ConfigOpt> {
    Ok(toml::from_str(content)?)
}

/// Reads the config file at `explicit`, or at the default location if that exists.
pub fn read_config_file(explicit: Option<&Path>) -> Result<ConfigOpt> {
    let path = match explicit {
        Some(path) => path.to_owned(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(ConfigOpt::default()),
        },
    };
    tracing::debug!(path = %path.display(), "reading config file");
    let content = std::fs::read_to_string(&path).with_context(|| format!("reading '{}'", path.display()))?;
    parse_config_file(&content).with_context(|| format!("parsing '{}'", path.display()))
}

/// Defaults, overridden by the config file, overridden by the command line.
pub fn load_config(explicit: Option<&Path>, command_line: ConfigOpt) -> Result<Config> {
    Ok(Config::default().update(read_config_file(explicit)?).update(command_line))
}
