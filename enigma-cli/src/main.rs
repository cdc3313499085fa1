#![deny(missing_docs)]
//! A command-line interface for the Enigma machine simulator.

use clap::{Parser, Subcommand};
use enigma_core::api::MachineSettings;
use enigma_core::config::{load_key_file, save_key_file};
use enigma_core::key_generator::{DEFAULT_PLUG_PAIRS, generate_os_key};
use enigma_core::{EngineError, EnigmaConfig, EnigmaMachine};
use error::{CliError, CliResult};
use log::{error, info};
use remote::{Outcome, RemoteEngine, encode_with_fallback};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

mod error;
mod remote;

/// Remote session shared by all CLI runs, so the backend holds one machine
/// for the CLI however often it is invoked.
const CLI_SESSION: &str = "cli";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Encode with the default key (rotors I-II-III, rings 1-1-1, start AAA)\nenigma-cli encode \"HELLO WORLD\"\n\n# Encode with an explicit key\nenigma-cli --rotors II,IV,V --rings 2,21,12 --positions BLA --plugs AV,BS,CG encode \"ATTACK AT DAWN\"\n\n# Generate a key file and use it\nenigma-cli key generate --output ./today.json\nenigma-cli --key-file ./today.json encode \"WETTERBERICHT\"\n\n# Encrypt a file, then decrypt it with its metadata file\nenigma-cli --key-file ./today.json encrypt ./order.txt\nenigma-cli decrypt --input ./order.txt.enigma --output ./order.out.txt --metadata ./order.txt.enigma.metadata.json\n\n# Mirror a running enigma-web backend, falling back to the local engine\nenigma-cli --remote http://127.0.0.1:5000 encode \"HELLO\""
)]
struct Cli {
    /// Rotor order, leftmost first (e.g. I,II,III).
    #[arg(long, global = true, value_delimiter = ',', value_name = "ROTORS")]
    rotors: Option<Vec<String>>,

    /// Ring settings 1-26, leftmost first. Defaults to 1 for every rotor.
    #[arg(long, global = true, value_delimiter = ',', value_name = "RINGS")]
    rings: Option<Vec<u8>>,

    /// Start positions as letters, leftmost first. Defaults to A for every rotor.
    #[arg(long, global = true, value_name = "LETTERS")]
    positions: Option<String>,

    /// Plug leads as letter pairs (e.g. AB,CD).
    #[arg(long, global = true, value_delimiter = ',', value_name = "PAIRS")]
    plugs: Option<Vec<String>>,

    /// Reflector name.
    #[arg(long, global = true, value_name = "REFLECTOR")]
    reflector: Option<String>,

    /// Path to a JSON key file. Overrides the individual key options.
    #[arg(long, global = true, env = "ENIGMA_KEY_FILE", value_name = "KEY_FILE")]
    key_file: Option<PathBuf>,

    /// Base URL of an enigma-web backend to run the cipher on.
    #[arg(long, global = true, env = "ENIGMA_REMOTE_URL", value_name = "URL")]
    remote: Option<String>,

    /// Session to use on the remote backend. Each run replaces the machine in
    /// this session.
    #[arg(long, global = true, default_value = CLI_SESSION, value_name = "SESSION_ID")]
    session: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message
    Encode {
        /// The message to encode
        message: String,

        /// Print the rotor window after encoding
        #[arg(long)]
        show_state: bool,
    },
    /// Decode a message (the same operation as encode)
    Decode {
        /// The message to decode
        message: String,

        /// Print the rotor window after decoding
        #[arg(long)]
        show_state: bool,
    },
    /// Encrypt a text file and save its key alongside
    Encrypt {
        /// Path to the input file to encrypt
        #[arg()]
        input: PathBuf,

        /// Path to the output file. If omitted, uses the input filename with a .enigma extension.
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Decrypt a text file
    Decrypt {
        /// Path to the input file to decrypt
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the output file to save the decrypted content
        #[arg(short, long)]
        output: PathBuf,

        /// Path to the ciphertext metadata file. If omitted, the key options are used.
        #[arg(long, value_name = "METADATA_FILE")]
        metadata: Option<PathBuf>,
    },
    /// Inspect machine configurations
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Manage machine keys
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the default machine configuration
    Default,
    /// Print the configuration the key options resolve to
    Show,
}

#[derive(Subcommand)]
#[command(
    after_help = "EXAMPLES:\n  \n# Print five random keys with ten plug leads each\nenigma-cli key generate --count 5\n\n# Write one key without plug leads to a file\nenigma-cli key generate --plug-pairs 0 --output ./key.json"
)]
enum KeyCommands {
    /// Generate random machine keys
    Generate {
        /// The number of keys to generate
        #[arg(short, long, default_value_t = 1)]
        count: u32,
        /// The number of plug leads per key (0-13)
        #[arg(long, default_value_t = DEFAULT_PLUG_PAIRS)]
        plug_pairs: usize,
        /// Write the key to this file instead of printing it. Requires --count 1.
        #[arg(short, long, value_name = "KEY_FILE")]
        output: Option<PathBuf>,
    },
}

/// Metadata stored alongside the ciphertext to enable correct decryption.
#[derive(serde::Serialize, serde::Deserialize)]
struct CiphertextMetadata {
    key: EnigmaConfig,
    length: usize,
    ciphertext_hash: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Encode {
            message,
            show_state,
        }
        | Commands::Decode {
            message,
            show_state,
        } => {
            let config = effective_config(cli)?;
            let outcome = encode(cli, &config, message)?;
            println!("{}", outcome.text);
            if *show_state {
                println!("Rotor window: {}", outcome.state.rotor_window());
            }
        }
        Commands::Encrypt { input, output } => {
            let config = effective_config(cli)?;
            let output = output.clone().unwrap_or_else(|| {
                let mut new_path = input.as_os_str().to_owned();
                new_path.push(".enigma");
                PathBuf::from(new_path)
            });
            encrypt_file(cli, &config, input, &output)?;
        }
        Commands::Decrypt {
            input,
            output,
            metadata,
        } => {
            let ciphertext = fs::read_to_string(input)?;
            let config = match metadata {
                Some(meta_path) => {
                    let meta: CiphertextMetadata =
                        serde_json::from_str(&fs::read_to_string(meta_path)?)?;
                    if sha256_hex(&ciphertext) != meta.ciphertext_hash {
                        return Err(CliError::HashMismatch);
                    }
                    let actual = ciphertext.chars().count();
                    if actual != meta.length {
                        return Err(CliError::LengthMismatch {
                            expected: meta.length,
                            actual,
                        });
                    }
                    EnigmaMachine::new(&meta.key)?;
                    meta.key
                }
                None => effective_config(cli)?,
            };
            info!(
                "Decrypting '{}' with rotor window {}.",
                input.display(),
                config.rotor_window()
            );
            let outcome = encode(cli, &config, &ciphertext)?;
            fs::write(output, &outcome.text)?;
            println!(
                "Successfully decrypted file '{}' to '{}'",
                input.display(),
                output.display()
            );
        }
        Commands::Config { command } => {
            let config = match command {
                ConfigCommands::Default => EnigmaMachine::create_default_config(),
                ConfigCommands::Show => effective_config(cli)?,
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Key { command } => match command {
            KeyCommands::Generate {
                count,
                plug_pairs,
                output,
            } => {
                if output.is_some() && *count != 1 {
                    return Err(CliError::InvalidInput(
                        "--output writes a single key; use --count 1".to_string(),
                    ));
                }
                info!("Generating {count} key(s) with {plug_pairs} plug lead(s) each...");
                for _ in 0..*count {
                    let key = generate_os_key(*plug_pairs)?;
                    match output {
                        Some(path) => {
                            save_key_file(path, &key)?;
                            println!("Key written to '{}'", path.display());
                        }
                        None => println!("{}", serde_json::to_string(&key)?),
                    }
                }
            }
        },
    }
    Ok(())
}

/// Resolves the key options into a validated configuration.
fn effective_config(cli: &Cli) -> CliResult<EnigmaConfig> {
    if let Some(path) = &cli.key_file {
        return Ok(load_key_file(path)?);
    }

    let defaults = MachineSettings::default();
    let rotor_sequence = cli.rotors.clone().unwrap_or(defaults.rotor_sequence);
    let rotor_count = rotor_sequence.len();
    let settings = MachineSettings {
        ring_setting: cli.rings.clone().unwrap_or_else(|| vec![1; rotor_count]),
        initial_positions: cli
            .positions
            .clone()
            .unwrap_or_else(|| "A".repeat(rotor_count)),
        reflector: cli.reflector.clone().unwrap_or(defaults.reflector),
        rotor_sequence,
        plug_combinations: cli.plugs.clone().unwrap_or_default(),
    };
    let config = EnigmaConfig::try_from(&settings)?;
    EnigmaMachine::new(&config)?;
    Ok(config)
}

/// Encodes on the remote backend when one is configured, locally otherwise.
fn encode(cli: &Cli, config: &EnigmaConfig, message: &str) -> CliResult<Outcome> {
    let outcome = match &cli.remote {
        Some(url) => {
            encode_with_fallback(
                RemoteEngine::connect(url, cli.session.clone(), config),
                config,
                message,
            )?
        }
        None => encode_with_fallback(
            EnigmaMachine::new(config).map_err(EngineError::from),
            config,
            message,
        )?,
    };
    if let Some(cause) = &outcome.fallback {
        eprintln!("warning: fell back to local engine: {cause}");
    }
    Ok(outcome)
}

fn encrypt_file(cli: &Cli, config: &EnigmaConfig, input: &Path, output: &Path) -> CliResult<()> {
    let plaintext = fs::read_to_string(input)?;
    info!(
        "Encrypting '{}' with rotor window {}.",
        input.display(),
        config.rotor_window()
    );
    let outcome = encode(cli, config, &plaintext)?;
    fs::write(output, &outcome.text)?;

    let metadata = CiphertextMetadata {
        key: config.clone(),
        length: outcome.text.chars().count(),
        ciphertext_hash: sha256_hex(&outcome.text),
    };
    let metadata_path = format!("{}.metadata.json", output.display());
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;

    println!(
        "Successfully encrypted file '{}' to '{}'",
        input.display(),
        output.display()
    );
    println!("Decryption metadata saved to '{metadata_path}'");
    Ok(())
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
