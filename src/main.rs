//! Console front end that embeds the application core the way a GUI shell
//! would: build the services, register the standard routes, drive the
//! router, then render controller state and drain the notification feed.
//! Nothing here talks to the store directly; every flow goes through a
//! controller, so the binary exercises the same paths the screens do.

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cliente_manager::controllers::{ClienteDetailController, ClienteListController};
use cliente_manager::notify::{self, NotificationFeed, Severity};
use cliente_manager::{standard_routes, ClienteStore, Navigator, Router, Services};

/// Manage Cliente records in a local SQLite database.
#[derive(Parser)]
#[command(name = "cliente-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database file (default: ~/.cliente-manager/clientes.sqlite)
    #[arg(global = true, long)]
    db: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every stored Cliente
    List,

    /// Show one Cliente by id
    Show { id: i64 },

    /// Add a new Cliente
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        last_name: String,

        /// Age in years; validated by the form, not by the parser
        #[arg(long)]
        age: String,

        #[arg(long)]
        address: String,
    },

    /// Edit fields of an existing Cliente
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Delete a Cliente by id
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// The router plus the consumer end of the notification channel, which is
/// all the state this shell keeps between dispatches.
struct Shell {
    router: Router,
    feed: NotificationFeed,
}

impl Shell {
    fn new(db: Option<PathBuf>) -> anyhow::Result<Self> {
        let store = match db {
            Some(path) => ClienteStore::new(path),
            None => ClienteStore::open_default()
                .context("could not resolve the default database location")?,
        };
        let (notifier, feed) = notify::channel();
        let services = Services {
            store: Rc::new(store),
            notifier,
            navigator: Navigator::new(),
        };
        Ok(Self {
            router: Router::new(standard_routes(), services),
            feed,
        })
    }

    fn active_list(&self) -> anyhow::Result<&ClienteListController> {
        self.router
            .context()
            .active()
            .and_then(|entry| entry.destination().as_list())
            .context("list destination missing after navigation")
    }

    fn active_detail(&self) -> anyhow::Result<&ClienteDetailController> {
        self.router
            .context()
            .active()
            .and_then(|entry| entry.destination().as_detail())
            .context("detail destination missing after navigation")
    }

    fn active_detail_mut(&mut self) -> anyhow::Result<&mut ClienteDetailController> {
        self.router
            .context_mut()
            .active_mut()
            .and_then(|entry| entry.destination_mut().as_detail_mut())
            .context("detail destination missing after navigation")
    }

    /// Print everything the controllers reported: toasts to stdout, errors
    /// to stderr. Returns whether any error was among them.
    fn flush_notifications(&self) -> bool {
        let mut had_error = false;
        for note in self.feed.drain() {
            match note.severity {
                Severity::Info => println!("{}", note.message),
                Severity::Error => {
                    had_error = true;
                    eprintln!("{}", note.message);
                }
            }
        }
        had_error
    }

    fn print_list(&self) -> anyhow::Result<()> {
        let clientes = self.active_list()?.clientes();
        if clientes.is_empty() {
            println!("Nenhum cliente cadastrado.");
            return Ok(());
        }
        for cliente in clientes {
            println!(
                "{:>4}  {}, {} anos, {}",
                cliente.id, cliente, cliente.age, cliente.address
            );
        }
        Ok(())
    }

    /// Present the detail screen for `id` on top of the list and fail if
    /// the record no longer exists.
    fn open_detail(&mut self, id: i64) -> anyhow::Result<()> {
        self.router.navigate("clientes")?;
        self.router.navigate(&format!("cliente?id={id}"))?;
        if self.active_detail()?.cliente().is_none() {
            self.flush_notifications();
            bail!("no Cliente with id {id}");
        }
        Ok(())
    }

    /// Dispatch whatever the controllers queued (the `..?refresh=true` after
    /// a save or delete) and report the outcome to the terminal.
    fn finish(&mut self) -> anyhow::Result<()> {
        self.router
            .pump()
            .context("navigation after the operation failed")?;
        if self.flush_notifications() {
            bail!("operation aborted");
        }
        self.print_list()
    }
}

fn confirm_delete() -> anyhow::Result<bool> {
    print!("Tem certeza que deseja excluir este cliente? [s/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "sim"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut shell = Shell::new(cli.db)?;

    match cli.command {
        Commands::List => {
            shell.router.navigate("clientes")?;
            shell.flush_notifications();
            shell.print_list()?;
        }
        Commands::Show { id } => {
            shell.open_detail(id)?;
            let detail = shell.active_detail()?;
            let cliente = detail.cliente().context("no Cliente loaded")?;
            println!("ID:        {}", cliente.id);
            println!("Nome:      {}", cliente.name);
            println!("Sobrenome: {}", cliente.last_name);
            println!("Idade:     {}", cliente.age);
            println!("Endereço:  {}", cliente.address);
        }
        Commands::Add {
            name,
            last_name,
            age,
            address,
        } => {
            shell.router.navigate("clientes")?;
            shell.router.navigate("cliente")?;
            let detail = shell.active_detail_mut()?;
            detail.form.name = name;
            detail.form.last_name = last_name;
            detail.form.age = age;
            detail.form.address = address;
            detail.save();
            shell.finish()?;
        }
        Commands::Edit {
            id,
            name,
            last_name,
            age,
            address,
        } => {
            shell.open_detail(id)?;
            let detail = shell.active_detail_mut()?;
            if let Some(name) = name {
                detail.form.name = name;
            }
            if let Some(last_name) = last_name {
                detail.form.last_name = last_name;
            }
            if let Some(age) = age {
                detail.form.age = age;
            }
            if let Some(address) = address {
                detail.form.address = address;
            }
            detail.save();
            shell.finish()?;
        }
        Commands::Delete { id, yes } => {
            shell.open_detail(id)?;
            if !yes && !confirm_delete()? {
                println!("Exclusão cancelada.");
                return Ok(());
            }
            shell.active_detail_mut()?.delete();
            shell.finish()?;
        }
    }

    Ok(())
}
