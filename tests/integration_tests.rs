use clap::{CommandFactory, Parser};
use devcli::cli::{Cli, Commands, CompletionShell};

#[test]
fn test_all_subcommands_registered() {
    let cmd = Cli::command();
    let names: Vec<&str> = cmd.get_subcommands().map(|s| s.get_name()).collect();

    for expected in [
        "list",
        "clean",
        "up",
        "run",
        "open",
        "shell",
        "exec",
        "ports",
        "logs",
        "down",
        "kill",
        "config",
        "add-completion",
        "update",
    ] {
        assert!(names.contains(&expected), "missing subcommand {expected}");
    }
}

#[test]
fn test_logs_follow_and_path() {
    let cli = Cli::try_parse_from(["dev", "logs", "-f", "/tmp/project"]).unwrap();
    match cli.command {
        Commands::Logs { follow, caminho } => {
            assert!(follow);
            assert_eq!(caminho.as_deref(), Some("/tmp/project"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_kill_keep_flag() {
    let cli = Cli::try_parse_from(["dev", "kill", "--keep"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Kill {
            keep: true,
            caminho: None
        }
    ));
}

#[test]
fn test_config_arguments() {
    let cli = Cli::try_parse_from(["dev", "config", "--global", "core.tool", "podman"]).unwrap();
    match cli.command {
        Commands::Config {
            chave,
            valor,
            global,
            interactive,
        } => {
            assert_eq!(chave, "core.tool");
            assert_eq!(valor.as_deref(), Some("podman"));
            assert!(global);
            assert!(!interactive);
        }
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(Cli::try_parse_from(["dev", "config", "--global"]).is_err());
    assert!(Cli::try_parse_from(["dev", "config", "--global", "a", "b", "c"]).is_err());
}

#[test]
fn test_add_completion_shells() {
    let cli = Cli::try_parse_from(["dev", "add-completion", "powershell"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::AddCompletion {
            shell: Some(CompletionShell::Powershell)
        }
    ));

    assert!(Cli::try_parse_from(["dev", "add-completion", "fish"]).is_err());
}

#[test]
fn test_config_dir_flag_overrides_default() {
    let cli = Cli::try_parse_from(["dev", "--config-dir", "/tmp/devcli", "list"]).unwrap();
    assert_eq!(cli.config_dir, std::path::PathBuf::from("/tmp/devcli"));
}

#[test]
fn test_exec_hyphen_arguments_stay_with_command() {
    let cli = Cli::try_parse_from(["dev", "exec", "npm", "test", "--watch"]).unwrap();
    match cli.command {
        Commands::Exec { path, command } => {
            assert_eq!(path, None);
            assert_eq!(command[0], "npm");
            assert!(command.contains(&"--watch".to_string()));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}
