use anyhow::bail;
use scanbatch_common::config::ScannerConfig;
use scanbatch_common::config::store::{ConfigStore, JsonFileStore};
use scanbatch_common::{success, warn};

use crate::commands::{ConfigAction, SetArgs};
use crate::terminal::{format, print};

pub fn config(action: ConfigAction, store: &JsonFileStore, q_level: u8) -> anyhow::Result<()> {
    match action {
        ConfigAction::Path => {
            print::print(&store.path().display().to_string());
            Ok(())
        }
        ConfigAction::Show => show(store, q_level),
        ConfigAction::Set(args) => set(&args, store),
    }
}

fn show(store: &JsonFileStore, q_level: u8) -> anyhow::Result<()> {
    let Some(config) = store.load()? else {
        warn!("No configuration at {}", store.path().display());
        return Ok(());
    };

    print::header("configuration", q_level);
    print::aligned_lines(&format::config_rows(&config));
    if let Err(e) = config.validate() {
        warn!("{e}");
    }
    Ok(())
}

fn set(args: &SetArgs, store: &JsonFileStore) -> anyhow::Result<()> {
    let mut config: ScannerConfig = store.load()?.unwrap_or_default();
    if !apply(&mut config, args)? {
        bail!("nothing to change, see `scanbatch config set --help`");
    }

    store.save(&config)?;
    success!("Saved configuration to {}", store.path().display());
    if let Err(e) = config.validate() {
        warn!("{e}");
    }
    Ok(())
}

/// Copies the given settings into `config`. Returns whether anything was set.
pub fn apply(config: &mut ScannerConfig, args: &SetArgs) -> anyhow::Result<bool> {
    let mut changed = false;

    if let Some(url) = &args.api_url {
        config.api_url = url.trim().trim_end_matches('/').to_string();
        changed = true;
    }
    if let Some(key) = &args.api_key {
        config.api_key = key.trim().to_string();
        changed = true;
    }
    if let Some(proxy) = &args.proxy {
        config.set_scan_proxy(proxy)?;
        changed = true;
    }
    if args.no_proxy {
        config.clear_scan_proxy();
        changed = true;
    }
    if let Some(threads) = args.threads {
        if threads == 0 {
            bail!("--threads must be at least 1");
        }
        config.thread_num = threads;
        changed = true;
    }
    if let Some(speed) = args.speed {
        config.scan_speed = speed;
        changed = true;
    }
    if let Some(report) = args.report {
        config.report_type = report;
        changed = true;
    }
    if let Some(insecure) = args.insecure {
        config.insecure_tls = insecure;
        changed = true;
    }
    if let Some(proxy) = &args.client_proxy {
        let proxy = proxy.trim();
        config.client_proxy = (!proxy.is_empty()).then(|| proxy.to_string());
        changed = true;
    }

    Ok(changed)
}
