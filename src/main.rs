use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pangan::api::{analytics, auth, inventory, kitchen, orders, suppliers};
use pangan::client::{ApiClient, UploadFile};
use pangan::config::Config;
use pangan::device::{current_position, source_from_position, Position};
use pangan::error::{ClientError, Result};
use pangan::models::{
    CookRequest, LoginRequest, Order, OrderStatus, SupplyItem, EXPIRY_WARNING_DAYS,
};
use pangan::session::{CredentialStore, FileStore, Role, RoleRouter, RouteState};

/// Client della piattaforma forniture: superficie vendor e kitchen
#[derive(Debug, Parser)]
#[command(name = "pangan", version, about)]
struct Cli {
    /// Base URL del backend (sovrascrive API_BASE)
    #[arg(long = "api-base", value_name = "url")]
    api_base: Option<String>,

    /// File della sessione (sovrascrive PANGAN_SESSION_FILE)
    #[arg(long = "session-file", value_name = "path")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Superficie corrente e utente
    Status,
    /// Login con username/email e password (il ruolo arriva dal backend)
    Login {
        #[arg(long = "user", value_name = "username_or_email")]
        user: String,
        #[arg(long, env = "PANGAN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Login con la credenziale del provider di identità
    LoginGoogle {
        #[arg(long, default_value = "vendor")]
        role: Role,
        #[arg(long)]
        credential: String,
    },
    Logout,
    /// Statistiche della superficie corrente
    Analytics,
    /// Cerca fornitori per prodotto
    Suppliers {
        query: String,
        /// Ordina per distanza dalla posizione del dispositivo
        #[arg(long)]
        near: bool,
    },
    /// Elenco forniture
    Supplies,
    /// Foto inventario analizzata dall'AI (vendor)
    Capture {
        photo: PathBuf,
        /// Salva subito gli articoli rilevati
        #[arg(long)]
        save: bool,
    },
    /// Ordini ricevuti (vendor) o effettuati (kitchen)
    Orders,
    /// Aggiorna lo stato di un ordine
    OrderUpdate { id: i64, status: OrderStatus },
    /// SPPG più vicine (vendor)
    Sppg,
    /// Registra una produzione (kitchen)
    Cook {
        #[arg(long)]
        menu: String,
        #[arg(long)]
        qty: u32,
        /// Id delle forniture usate
        #[arg(long = "ingredient", value_name = "id")]
        ingredients: Vec<i64>,
    },
    /// Suggerimento menu dagli ingredienti (kitchen)
    Recommend {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Domanda all'assistente (kitchen)
    Chat {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Letture dei sensori (kitchen)
    Iot {
        /// Aggiorna ogni N secondi fino a Ctrl+C
        #[arg(long, value_name = "secs", value_parser = clap::value_parser!(u64).range(1..))]
        watch: Option<u64>,
    },
    /// Invia le notifiche di scadenza (kitchen)
    Notify,
}

#[tokio::main]
async fn main() {
    // Carica variabili da .env
    dotenvy::dotenv().ok();

    // Log su stderr, stdout resta per l'output dei comandi
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pangan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("Errore: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    tracing::debug!("Backend: {}", config.base_url());

    let store = Arc::new(CredentialStore::new(FileStore::new(&config.session_file)));
    let client = ApiClient::new(&config, store.clone())?;
    let mut router = RoleRouter::new(store.clone());
    router.mount();

    match cli.command {
        Command::Status => {
            match store.load() {
                Some(credential) => println!(
                    "{} ({})",
                    router.state(),
                    credential.user.display_name().unwrap_or("utente")
                ),
                None => println!("{}", router.state()),
            }
        }
        Command::Login { user, password } => {
            ensure_logged_out(&router)?;
            let request = LoginRequest {
                username_or_email: user,
                password,
            };
            let state = auth::sign_in(&client, &mut router, &request).await?;
            print_landing(state);
        }
        Command::LoginGoogle { role, credential } => {
            choose_role(&mut router, role)?;
            let state = auth::sign_in_with_identity(&client, &mut router, &credential).await?;
            print_landing(state);
        }
        Command::Logout => {
            router.logout();
            println!("Logout eseguito");
        }
        Command::Analytics => match router.require_any()? {
            Role::Vendor => {
                let stats = analytics::vendor_analytics(&client).await.into_data()?;
                let health = stats.health();
                println!(
                    "Inventario: {}% segmento fresco, {}% in scadenza, {}% scaduto",
                    health.fresh, health.warning, health.expired
                );
                for point in stats.expiry_risk() {
                    println!("  rischio {:<12} {}", point.name, point.value);
                }
                for point in &stats.top_sales {
                    println!("  vendite {:<12} {}", point.name, point.value);
                }
            }
            Role::Kitchen => {
                let stats = analytics::kitchen_analytics(&client).await.into_data()?;
                println!(
                    "Articoli: {}, quantità totale: {}, in scadenza: {}",
                    stats.metrics.total_items, stats.metrics.total_qty, stats.metrics.warning_count
                );
                for point in stats.composition.iter().chain(&stats.quality) {
                    println!("  {:<20} {}", point.name, point.value);
                }
            }
        },
        Command::Suppliers { query, near } => {
            router.require_any()?;
            let found = if near {
                let source = source_from_position(config.fixed_position);
                suppliers::search_suppliers_near(&client, &query, source.as_ref()).await?
            } else {
                suppliers::search_suppliers(&client, &query, None).await
            }
            .into_data()?;
            if found.is_empty() {
                println!("Nessun fornitore trovato per '{}'", query);
            }
            for supplier in found {
                println!(
                    "{} - {} {}",
                    supplier.name,
                    supplier.location.as_deref().unwrap_or("-"),
                    supplier
                        .distance_km
                        .map(|d| format!("({:.1} km)", d))
                        .unwrap_or_default()
                );
            }
        }
        Command::Supplies => {
            let items = match router.require_any()? {
                Role::Vendor => inventory::vendor_supplies(&client).await,
                Role::Kitchen => inventory::list_supplies(&client).await,
            }
            .into_data()?;
            print_supplies(&items);
        }
        Command::Capture { photo, save } => {
            router.require(Role::Vendor)?;
            let file = UploadFile::from_path(&photo).await?;
            let position = device_position(&config).await;
            let items = inventory::capture(&client, file, position).await?;
            print_supplies(&items);

            if save {
                inventory::save_supplies(&client, &items).await.into_result()?;
                println!("{} articoli salvati", items.len());
            }
        }
        Command::Orders => {
            let list = match router.require_any()? {
                Role::Vendor => orders::vendor_orders(&client).await,
                Role::Kitchen => orders::kitchen_orders(&client).await,
            }
            .into_data()?;
            print_orders(&list);
        }
        Command::OrderUpdate { id, status } => {
            router.require_any()?;
            orders::update_order(&client, id, status).await.into_result()?;
            println!("Ordine #{} aggiornato a {}", id, status);
        }
        Command::Sppg => {
            router.require(Role::Vendor)?;
            let source = source_from_position(config.fixed_position);
            let (result, device_error) = suppliers::nearest_sppg_from(&client, source.as_ref()).await;
            if let Some(e) = device_error {
                tracing::warn!("Posizione non disponibile ({}), uso Monas", e);
            }
            for sppg in result.into_data()? {
                println!(
                    "{} - {} {}",
                    sppg.name,
                    sppg.address.as_deref().unwrap_or("-"),
                    sppg.directions_url().unwrap_or_default()
                );
            }
        }
        Command::Cook {
            menu,
            qty,
            ingredients,
        } => {
            router.require(Role::Kitchen)?;
            let request = CookRequest {
                menu_name: menu,
                qty_produced: qty,
                ingredients_ids: ingredients,
            };
            let result = kitchen::start_cooking(&client, &request).await.into_result()?;
            print_value(result);
        }
        Command::Recommend { ingredients } => {
            router.require(Role::Kitchen)?;
            let result = kitchen::recommend_menu(&client, &ingredients).await.into_result()?;
            print_value(result);
        }
        Command::Chat { message } => {
            router.require(Role::Kitchen)?;
            let reply = kitchen::chat(&client, &message.join(" ")).await.into_data()?;
            println!("{}", reply.text());
        }
        Command::Iot { watch } => {
            router.require(Role::Kitchen)?;
            match watch {
                None => {
                    for log in kitchen::iot_logs(&client).await.into_data()? {
                        print_iot(&log);
                    }
                }
                Some(secs) => {
                    let subscription = kitchen::watch_iot_logs(
                        client.clone(),
                        Duration::from_secs(secs),
                        |envelope| match envelope.into_data() {
                            Ok(logs) => logs.iter().take(1).for_each(print_iot),
                            Err(e) => tracing::warn!("Lettura sensori fallita: {}", e),
                        },
                    );
                    tokio::signal::ctrl_c().await?;
                    subscription.stop().await;
                }
            }
        }
        Command::Notify => {
            router.require(Role::Kitchen)?;
            let result = kitchen::trigger_notifications(&client).await.into_result()?;
            print_value(result);
        }
    }

    Ok(())
}

fn ensure_logged_out(router: &RoleRouter) -> Result<()> {
    match router.state().role() {
        Some(_) => Err(active_session()),
        None => Ok(()),
    }
}

fn choose_role(router: &mut RoleRouter, role: Role) -> Result<()> {
    if router.choose_role(role) {
        Ok(())
    } else {
        Err(active_session())
    }
}

fn active_session() -> ClientError {
    ClientError::BadRequest("sessione già attiva, eseguire prima il logout".to_string())
}

fn print_landing(state: RouteState) {
    match state {
        RouteState::Vendor | RouteState::Kitchen => println!("Accesso eseguito: {}", state),
        _ => println!("Accesso eseguito, ruolo non riconosciuto"),
    }
}

async fn device_position(config: &Config) -> Option<Position> {
    let source = source_from_position(config.fixed_position);
    match current_position(source.as_ref()).await {
        Ok(position) => Some(position),
        Err(e) => {
            tracing::warn!("Posizione non disponibile: {}", e);
            None
        }
    }
}

fn print_supplies(items: &[SupplyItem]) {
    for item in items {
        let marker = if item.expires_within(EXPIRY_WARNING_DAYS) {
            "!"
        } else {
            " "
        };
        println!(
            "{} {:<24} {:>5} {:<6} {:<14} scade tra {} giorni  [{}]",
            marker,
            item.name,
            item.qty,
            item.unit,
            item.freshness,
            item.expiry_days,
            item.location
        );
    }
}

fn print_orders(list: &[Order]) {
    for order in list {
        let date = order
            .created_at_utc()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{:<5} {:<24} {:>6} {:<10} {}",
            order.id,
            order.item_name(),
            order.qty_ordered.unwrap_or_default(),
            order.status,
            date
        );
    }
}

fn print_iot(log: &pangan::models::IotLog) {
    println!(
        "{} temperatura {}°C umidità {}%",
        log.device_id.as_deref().unwrap_or("sensore"),
        log.temperature.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
        log.humidity.map(|h| h.to_string()).unwrap_or_else(|| "-".into())
    );
}

fn print_value(value: Option<serde_json::Value>) {
    match value {
        Some(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", value),
        },
        None => println!("OK"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["pangan", "iot", "--watch", "0"]).is_err());

        let cli = Cli::try_parse_from(["pangan", "iot", "--watch", "5"]).unwrap();
        assert!(matches!(cli.command, Command::Iot { watch: Some(5) }));
    }

    #[test]
    fn test_password_login_takes_no_role() {
        let args = ["pangan", "login", "--user", "sari", "--password", "rahasia"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Login { .. }));

        let with_role = [
            "pangan", "login", "--role", "kitchen", "--user", "sari", "--password", "rahasia",
        ];
        assert!(Cli::try_parse_from(with_role).is_err());
    }

    #[test]
    fn test_suppliers_near_flag() {
        let cli = Cli::try_parse_from(["pangan", "suppliers", "tomat", "--near"]).unwrap();
        assert!(matches!(cli.command, Command::Suppliers { near: true, .. }));
    }
}
