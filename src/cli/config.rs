use crate::infra::{ConfigKey, GlobalConfig};
use anyhow::{Context, Result, bail};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::path::Path;

/// `dev config <chave> [valor] --global [-i]`
#[derive(Debug, Clone)]
pub struct ConfigRequest {
    pub key: String,
    pub value: Option<String>,
    pub global: bool,
    pub interactive: bool,
}

pub fn run(config_dir: &Path, request: &ConfigRequest) -> Result<()> {
    let key = validate(request)?;
    let mut config = GlobalConfig::load(config_dir);

    let value = if request.interactive {
        select_value(key)?
    } else if let Some(value) = &request.value {
        value.clone()
    } else {
        println!("{}", key.get(&config));
        return Ok(());
    };

    update(config_dir, &mut config, key, &value)
}

fn validate(request: &ConfigRequest) -> Result<ConfigKey> {
    if !request.global {
        bail!("atualmente apenas a flag --global é suportada");
    }

    ConfigKey::parse(&request.key).ok_or_else(|| {
        let supported: Vec<String> = ConfigKey::ALL
            .iter()
            .map(|k| format!("* {}", k.name()))
            .collect();
        anyhow::anyhow!(
            "chave desconhecida: {}.\n\nChaves suportadas:\n{}",
            request.key,
            supported.join("\n")
        )
    })
}

fn update(config_dir: &Path, config: &mut GlobalConfig, key: ConfigKey, value: &str) -> Result<()> {
    key.set(config, value)?;
    config
        .save(config_dir)
        .context("erro ao salvar configuração")?;

    println!("Configuração '{}' atualizada para: {}", key.name(), value);
    Ok(())
}

fn select_value(key: ConfigKey) -> Result<String> {
    let items = key.valid_values();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(key.label())
        .items(items)
        .default(0)
        .interact_opt()
        .context("seleção cancelada")?;

    match selection {
        Some(index) => Ok(items[index].to_string()),
        None => bail!("seleção cancelada"),
    }
}
