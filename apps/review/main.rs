use std::fs;
use clap::{Arg, ArgMatches, Command, Parser};
use reedline::{Reedline, Signal};
use serde::Deserialize;

mod prompt;
use prompt::MyPrompt;

use visage::{
    configuration as cfg,
    config::Config,
    Error,
    ContactBuilder,
    Container,
    MatchState,
    MatchWorkflow,
    SqliteContactStore,
    ContactStore,
    WorkflowListener,
};

#[derive(Parser, Debug)]
#[command(name = "Review")]
#[command(version = "1.0")]
#[command(about = "Interactive contact avatar review", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// The directory for storing contact data
    #[arg(short, long, value_name = "PATH")]
    storage: Option<String>,

    /// Import contacts from a JSON file before reviewing
    #[arg(short, long, value_name = "FILE")]
    import: Option<String>,
}

#[derive(Deserialize)]
struct ImportEntry {
    #[serde(rename = "name")]
    name        : Option<String>,
    #[serde(rename = "emails")]
    emails      : Vec<String>,
    #[serde(rename = "image")]
    image       : Option<String>,
    #[serde(rename = "container")]
    container   : Option<String>,
}

fn import_contacts(db_path: &str, file: &str) -> Result<usize, Error> {
    let data = fs::read_to_string(file).map_err(|e| {
        Error::Io(format!("Reading import file error: {}", e))
    })?;
    let entries = serde_json::from_str::<Vec<ImportEntry>>(&data).map_err(|e| {
        Error::Argument(format!("bad import file, error: {}", e))
    })?;

    let mut store = SqliteContactStore::new();
    store.open(db_path)?;

    let mut imported = 0;
    for entry in entries.iter() {
        let container = entry.container.as_deref().unwrap_or("local");
        store.add_container(&Container::new(container, container))?;

        let id = SqliteContactStore::random_identifier();
        let mut b = ContactBuilder::new(&id);
        b.with_email_addresses(&entry.emails);
        if let Some(name) = entry.name.as_deref() {
            b.with_name(name);
        }
        if let Some(image) = entry.image.as_deref() {
            b.with_existing_image(fs::read(image).map_err(|e| {
                Error::Io(format!("Reading image file {} error: {}", image, e))
            })?);
        }

        store.add_contact(container, &b.build())?;
        imported += 1;
    }

    store.close();
    Ok(imported)
}

struct ConsoleListener;
impl WorkflowListener for ConsoleListener {
    fn on_row_updated(&self, contact_id: &str) {
        println!("=> candidate photo ready for contact {}", contact_id);
    }

    fn on_row_removed(&self, contact_id: &str) {
        println!("=> contact {} resolved", contact_id);
    }

    fn on_error(&self, error: &Error) {
        println!("Error: {}", error);
    }
}

fn build_cli() -> Command {
    Command::new("review")
        .about("Interactive avatar review shell")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(Command::new("list")
            .about("List contacts awaiting a decision"))
        .subcommand(Command::new("fetch")
            .about("Fetch candidate avatars for one contact, or for all")
            .arg(Arg::new("INDEX").required(false)))
        .subcommand(Command::new("show")
            .about("Show one contact in detail")
            .arg(Arg::new("INDEX").required(true)))
        .subcommand(Command::new("accept")
            .about("Write the candidate photo back to the store")
            .arg(Arg::new("INDEX").required(true)))
        .subcommand(Command::new("reject")
            .about("Discard the candidate photo")
            .arg(Arg::new("INDEX").required(true)))
        .subcommand(Command::new("reload")
            .about("Reload contacts from the store"))
        .help_template("{subcommands}")
}

fn contact_id_at(workflow: &MatchWorkflow, matches: &ArgMatches) -> Option<String> {
    let index = matches.get_one::<String>("INDEX").unwrap();
    let Ok(index) = index.parse::<usize>() else {
        println!("Error: invalid index: {}", index);
        return None;
    };

    match workflow.contacts().get(index) {
        Some(contact) => Some(contact.id().to_string()),
        None => {
            println!("Error: no contact at index {}", index);
            None
        }
    }
}

fn print_list(workflow: &MatchWorkflow) {
    if workflow.contacts().is_empty() {
        println!("No contacts are awaiting a decision.");
        return;
    }

    for (index, contact) in workflow.contacts().iter().enumerate() {
        let candidate = match contact.state() {
            MatchState::Matched => "candidate ready",
            MatchState::Fetching => "fetching...",
            MatchState::FetchFailed => "no match found",
            MatchState::Pending => "not fetched",
        };
        println!("[{}] {} - {}", index, contact, candidate);
    }
}

async fn execute_command(matches: ArgMatches, workflow: &mut MatchWorkflow) {
    match matches.subcommand() {
        Some(("list", _)) => {
            print_list(workflow);
        }

        Some(("fetch", m)) => {
            let targets: Vec<String> = match m.get_one::<String>("INDEX") {
                Some(_) => match contact_id_at(workflow, m) {
                    Some(id) => vec![id],
                    None => return,
                },
                None => workflow.contacts().iter()
                    .map(|v| v.id().to_string())
                    .collect(),
            };

            for id in targets.iter() {
                if let Err(e) = workflow.begin_match(id).await {
                    println!("Error fetching avatar for contact {}: {}", id, e);
                }
            }
        }

        Some(("show", m)) => {
            let Some(id) = contact_id_at(workflow, m) else {
                return;
            };
            let Some(contact) = workflow.contact(&id) else {
                return;
            };

            println!("identifier: {}", contact.id());
            println!("name:       {}", contact.name().unwrap_or("(unnamed)"));
            println!("emails:     {}", contact.email_addresses().join(", "));
            println!("state:      {}", contact.state());
            match contact.candidate_image() {
                Some(image) => println!("candidate:  {} bytes", image.len()),
                None => println!("candidate:  none"),
            }
        }

        Some(("accept", m)) => {
            let Some(id) = contact_id_at(workflow, m) else {
                return;
            };
            let has_candidate = workflow.contact(&id)
                .and_then(|v| v.candidate_image())
                .is_some();
            if has_candidate {
                // a failed save is reported through the listener and
                // the contact stays in place for a retry.
                _ = workflow.accept(&id);
            } else {
                println!("Contact {} has no candidate photo to accept.", id);
            }
        }

        Some(("reject", m)) => {
            let Some(id) = contact_id_at(workflow, m) else {
                return;
            };
            workflow.reject(&id);
        }

        Some(("reload", _)) => {
            match workflow.load() {
                Ok(num) => println!("{} contacts are missing a profile photo.", num),
                Err(e) => println!("Error reloading contacts: {}", e),
            }
        }

        _ => {}
    }
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();
    let mut b = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        b.load(path)
            .map_err(|e| panic!("{e}"))
            .unwrap();
    }
    if let Some(path) = opts.storage.as_ref() {
        b.with_data_dir(path);
    }

    let cfg = b.build()
        .map_err(|e| panic!("{e}"))
        .unwrap();

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    if let Err(e) = fs::create_dir_all(cfg.data_dir()) {
        eprintln!("Creating data directory {} error: {}", cfg.data_dir(), e);
        return;
    }
    let db_path = format!("{}/contacts.db", cfg.data_dir());

    if let Some(file) = opts.import.as_ref() {
        match import_contacts(&db_path, file) {
            Ok(num) => println!("Imported {} contacts from {}.", num, file),
            Err(e) => {
                eprintln!("Importing contacts error: {}", e);
                return;
            }
        }
    }

    let store = SqliteContactStore::new();
    let mut workflow = match MatchWorkflow::new(&cfg, Box::new(store)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Creating review workflow error: {}", e);
            return;
        }
    };
    workflow.add_listener(Box::new(ConsoleListener));

    if let Err(e) = workflow.open(&db_path) {
        eprintln!("Opening contact store error: {}", e);
        return;
    }

    match workflow.load() {
        Ok(num) => println!("{} contacts are missing a profile photo.", num),
        Err(e) => {
            eprintln!("Cannot load contacts: {}", e);
            workflow.close();
            return;
        }
    }

    let mut cli = build_cli();
    let mut rl = Reedline::create();
    let prompt = MyPrompt;

    println!("Welcome to the avatar review shell. Type 'help' for commands, 'exit' to quit.\n");

    loop {
        let Ok(sig) = rl.read_line(&prompt) else {
            println!("\n Fatal error occurred.");
            continue;
        };
        match sig {
            Signal::Success(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = cli.print_long_help();
                        continue;
                    }
                    _ => {}
                }

                let args: Vec<String> = input.split_whitespace()
                    .map(|s| s.to_string())
                    .collect();

                let cmd = args.join(" ");
                match cli.clone().try_get_matches_from(args) {
                    Ok(matches) => execute_command(matches, &mut workflow).await,
                    Err(_) => {
                        println!("Error: command not found: '{}'", cmd);
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    workflow.close();
}
