use crate::infra::ConfigKey;
use crate::infra::config::default_config_dir;
use clap::builder::{PossibleValue, StringValueParser, TypedValueParser};
use clap::{Arg, Command, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dev",
    version,
    about = "CLI para gerenciar Dev Containers"
)]
pub struct Cli {
    /// Diretório de configuração (default: ~/.dev-cli)
    #[arg(long, global = true, env = "DEVCLI_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Exibe logs de diagnóstico
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lista dev containers ativos
    List,
    /// Remove containers e redes parados
    Clean,
    /// Apenas sobe o devcontainer
    Up {
        /// Pasta do projeto (default: diretório atual)
        caminho: Option<String>,
    },
    /// Sobe o container e abre o VS Code
    Run { caminho: Option<String> },
    /// Abre o VS Code no container
    Open { caminho: Option<String> },
    /// Abre um shell interativo dentro do container
    Shell { caminho: Option<String> },
    /// Executa um comando específico dentro do container
    Exec {
        /// Pasta do projeto (default: diretório atual)
        #[arg(short, long)]
        path: Option<String>,

        /// Comando e argumentos repassados ao container
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
    /// Lista as portas mapeadas do container
    Ports { caminho: Option<String> },
    /// Exibe os logs do container do workspace
    Logs {
        /// Acompanha a saída dos logs
        #[arg(short, long)]
        follow: bool,
        caminho: Option<String>,
    },
    /// Para graciosamente o container do workspace atual (stop)
    Down { caminho: Option<String> },
    /// Encerra o container do workspace atual
    Kill {
        /// Apenas mata os processos, sem remover os containers
        #[arg(long)]
        keep: bool,
        caminho: Option<String>,
    },
    /// Gerencia as configurações da CLI
    Config {
        /// Chave de configuração (ex: core.tool)
        #[arg(value_parser = ConfigHint::Key, hide_possible_values = true)]
        chave: String,
        /// Novo valor; sem ele o valor atual é exibido
        #[arg(value_parser = ConfigHint::Value, hide_possible_values = true)]
        valor: Option<String>,
        /// Aplica a configuração no escopo global
        #[arg(long)]
        global: bool,
        /// Abre um menu interativo para seleção de opções válidas
        #[arg(short, long)]
        interactive: bool,
    },
    /// Configura o autocompletar da CLI automaticamente no seu shell
    AddCompletion {
        #[arg(value_enum)]
        shell: Option<CompletionShell>,
    },
    /// [EXPERIMENTAL] Atualiza a CLI para a última versão publicada
    Update,
}

/// Offers config keys and values to shell completion without rejecting others;
/// `dev config` reports unknown keys and values itself.
#[derive(Clone, Copy, Debug)]
enum ConfigHint {
    Key,
    Value,
}

impl TypedValueParser for ConfigHint {
    type Value = String;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<<Self as TypedValueParser>::Value, clap::Error> {
        StringValueParser::new().parse_ref(cmd, arg, value)
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        let values: Vec<&'static str> = match self {
            Self::Key => ConfigKey::ALL.iter().map(ConfigKey::name).collect(),
            Self::Value => ConfigKey::ALL
                .iter()
                .flat_map(|k| k.valid_values().iter().copied())
                .collect(),
        };
        Some(Box::new(values.into_iter().map(PossibleValue::new)))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Powershell,
}

impl CompletionShell {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Powershell => "ps1",
        }
    }

    pub fn generator(&self) -> clap_complete::Shell {
        match self {
            Self::Bash => clap_complete::Shell::Bash,
            Self::Zsh => clap_complete::Shell::Zsh,
            Self::Powershell => clap_complete::Shell::PowerShell,
        }
    }

    /// Line that loads `script` from the shell's startup file
    pub fn source_line(&self, script: &std::path::Path) -> String {
        match self {
            Self::Powershell => format!(". {}", script.display()),
            _ => format!("source {}", script.display()),
        }
    }
}
