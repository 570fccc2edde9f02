use anyhow::{Context, Result};

const REPO_OWNER: &str = "Brennon-Oliveira";
const REPO_NAME: &str = "dev-cli";
const BIN_NAME: &str = "dev";

/// Replaces the running binary with the latest GitHub release
pub fn update() -> Result<()> {
    println!("Verificando atualizações...");

    let status = self_update::backends::github::Update::configure()
        .repo_owner(REPO_OWNER)
        .repo_name(REPO_NAME)
        .bin_name(BIN_NAME)
        .show_download_progress(true)
        .current_version(env!("CARGO_PKG_VERSION"))
        .build()
        .context("falha ao configurar a atualização")?
        .update()
        .context("falha ao buscar última versão")?;

    if status.updated() {
        println!("CLI atualizada para a versão {}.", status.version());
    } else {
        println!("A CLI já está na última versão ({}).", status.version());
    }
    Ok(())
}
