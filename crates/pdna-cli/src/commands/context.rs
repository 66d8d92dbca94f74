use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use pdna_application::ParentDnaService;
use pdna_core::config::{AppConfig, StorageBackend};
use pdna_core::store::DocumentStore;
use pdna_infrastructure::{ConfigService, DirDocumentStore, InMemoryDocumentStore, PdnaPaths};

/// Store selection from the global flags.
pub struct StoreOptions {
    pub backend: Option<StorageBackend>,
    pub data_dir: Option<PathBuf>,
}

/// Everything a store-backed command needs.
pub struct CliContext {
    pub config: AppConfig,
    pub backend: StorageBackend,
    pub gateway: Arc<ParentDnaService>,
}

impl CliContext {
    /// Resolves paths and config and opens the selected store.
    ///
    /// An in-memory store starts empty on every run; with `preload` it is
    /// seeded with the built-in dataset so read commands have something to
    /// read.
    pub async fn open(options: &StoreOptions, preload: bool) -> Result<Self> {
        let (paths, config) = load_config(options)?;
        let backend = options.backend.unwrap_or(config.storage.backend);

        let store: Arc<dyn DocumentStore> = match backend {
            StorageBackend::Dir => Arc::new(DirDocumentStore::new(paths.store_dir())),
            StorageBackend::Memory => Arc::new(InMemoryDocumentStore::new()),
        };
        let gateway = Arc::new(ParentDnaService::with_store(store));

        if preload && backend == StorageBackend::Memory {
            let report = gateway.load_all(&config.seed, true).await;
            if !report.success {
                anyhow::bail!("Seeding the in-memory store failed: {}", report.message);
            }
        }

        Ok(Self {
            config,
            backend,
            gateway,
        })
    }
}

pub fn load_config(options: &StoreOptions) -> Result<(PdnaPaths, AppConfig)> {
    let paths = PdnaPaths::resolve().context("Failed to resolve the Parent DNA directories")?;
    let config = ConfigService::from_paths(&paths)
        .get_config()
        .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;

    let data_dir = options.data_dir.clone().or_else(|| config.storage.data_dir.clone());
    Ok((paths.with_data_dir(data_dir), config))
}

pub fn show(options: &StoreOptions) -> Result<()> {
    let (paths, config) = load_config(options)?;
    let backend = options.backend.unwrap_or(config.storage.backend);

    println!("⚙️  Parent DNA configuration");
    println!("  Config file:  {}", paths.config_file().display());
    println!("  Store:        {}", backend);
    println!("  Store dir:    {}", paths.store_dir().display());
    println!("  Outbox dir:   {}", paths.outbox_dir().display());
    println!("  Logs dir:     {}", paths.logs_dir().display());
    println!("  Seed:         {} v{}", config.seed.dataset, config.seed.version);
    println!(
        "  Admin secret: {}",
        if config.admin.shared_secret.is_empty() {
            "not set (admin sign-in disabled)"
        } else {
            "set"
        }
    );
    println!("  Session:      {} minutes", config.admin.session_timeout_minutes);
    Ok(())
}
