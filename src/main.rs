use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use utxo_ledger::engine::{BatchResource, Engine, EngineConfig, EngineError, EngineRegistry};
use utxo_ledger::identity::Keypair;
use utxo_ledger::ledger::{UTXOKey, UTXOPool};
use utxo_ledger::tx::{Transaction, TransactionBuilder, TransactionCodec, TransactionError};

#[derive(Parser)]
#[command(name = "ledger", version, about = "UTXO settlement core")]
struct Cli {
    /// Engine to run
    #[arg(long, global = true, default_value = "basic")]
    engine: String,

    /// Largest accepted batch (0 = unlimited)
    #[arg(long, global = true, default_value_t = 0)]
    max_batch_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered engines
    Engines,
    /// Run the genesis, split, re-split, and double-spend walkthrough
    Demo,
    /// Decode a hex-encoded transaction and print it
    Decode {
        /// Hex produced by TransactionCodec::encode_hex
        hex: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Codec(#[from] utxo_ledger::tx::CodecError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::new().with_max_batch_size(cli.max_batch_size);
    let registry = EngineRegistry::with_defaults(config);

    let result = match cli.command {
        Command::Engines => {
            for name in registry.names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Demo => run_demo(&registry, &cli.engine),
        Command::Decode { hex } => decode(&hex),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn print_ledger(label: &str, engine: &dyn Engine) -> Result<(), CliError> {
    println!("Ledger ({}):", label);
    for line in engine.dump_ledger()? {
        println!("  {}", line);
    }
    Ok(())
}

fn pay(spent: &UTXOKey, signer: &Keypair, outputs: &[(i64, &Keypair)]) -> Result<Transaction, CliError> {
    let mut builder = TransactionBuilder::new();
    builder.spend(spent);
    for (value, owner) in outputs {
        builder.add_output(*value, owner.public_key());
    }
    builder.sign_input(0, signer)?;
    Ok(builder.finalize())
}

fn run_demo(registry: &EngineRegistry, engine_name: &str) -> Result<(), CliError> {
    let mut engine = registry.create(engine_name)?;

    let bob = Keypair::generate();
    let alice = Keypair::generate();
    let tim = Keypair::generate();
    let tam = Keypair::generate();

    // Bob mints 10 units out of band.
    let mut root = TransactionBuilder::new();
    root.add_input(None, 0).add_output(10, bob.public_key());
    root.sign_input(0, &bob)?;
    let root = root.finalize();

    engine.init(Some(UTXOPool::from_transaction(&root)));
    print_ledger("genesis", engine.as_ref())?;

    let split = pay(
        &UTXOKey::new(*root.hash(), 0),
        &bob,
        &[(5, &alice), (3, &alice), (2, &alice)],
    )?;
    let accepted = engine.on_resource_created(&BatchResource::with_transactions(vec![split.clone()]))?;
    println!("split: {} accepted", accepted.len());
    print_ledger("after split", engine.as_ref())?;

    let resplit = pay(&UTXOKey::new(*split.hash(), 1), &alice, &[(2, &tim), (1, &tam)])?;
    let accepted = engine.on_resource_created(&BatchResource::with_transactions(vec![resplit]))?;
    println!("re-split: {} accepted", accepted.len());
    print_ledger("after re-split", engine.as_ref())?;

    let five = UTXOKey::new(*split.hash(), 0);
    let to_tim = pay(&five, &alice, &[(5, &tim)])?;
    let to_tam = pay(&five, &alice, &[(5, &tam)])?;
    let accepted = engine.on_resource_created(&BatchResource::with_transactions(vec![to_tim, to_tam]))?;
    println!("double spend: {} of 2 accepted", accepted.len());
    print_ledger("after double spend", engine.as_ref())?;

    engine.destroy();
    Ok(())
}

fn decode(hex: &str) -> Result<(), CliError> {
    let tx = TransactionCodec::decode_hex(hex)?;
    println!("hash: {}", tx.hash());
    for (index, input) in tx.inputs().iter().enumerate() {
        let source = input
            .source_tx_hash()
            .map(|h| h.to_hex())
            .unwrap_or_else(|| "<root>".to_string());
        let signed = if input.signature().is_some() { "signed" } else { "unsigned" };
        println!("input {}: {}:{} ({})", index, source, input.output_index(), signed);
    }
    for (index, output) in tx.outputs().iter().enumerate() {
        println!("output {}: {} to {}", index, output.value(), output.owner().owner_id());
    }
    Ok(())
}
