use clap::Parser;
use std::io::Read;
use teco_core::teco::Teco;
use teco_core::interpreter::types::TecoOptions;

#[derive(Parser)]
#[command(name = "teco")]
#[command(about = "A character-stream command interpreter core")]
#[command(version)]
struct Cli {
    /// Execute the command string from the command line argument
    #[arg(short = 'c')]
    script: Option<String>,

    /// Enable C-like extended operator precedence inside parentheses
    #[arg(long = "xoper")]
    xoper: bool,

    /// Output results as JSON (output, error, pos)
    #[arg(long = "json")]
    json: bool,

    /// Command-string file to execute
    #[arg()]
    script_file: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let script = if let Some(s) = cli.script {
        s
    } else if let Some(ref file) = cli.script_file {
        match std::fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read command-string file: {}: {}", file, e);
                std::process::exit(1);
            }
        }
    } else {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            eprintln!("Error: No command string provided. Use -c 'commands', provide a file, or pipe via stdin.");
            std::process::exit(1);
        }
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_default();
        buf
    };

    if script.trim().is_empty() {
        if cli.json {
            println!("{}", serde_json::json!({"output": "", "error": null, "pos": 0}));
        }
        std::process::exit(0);
    }

    let options = TecoOptions { xoper: cli.xoper, ..TecoOptions::default() };
    let mut teco = Teco::with_stubs(options);
    let result = teco.exec(script);

    let output = {
        let interp = teco.interpreter();
        interp
            .terminal
            .as_any()
            .downcast_ref::<teco_core::collaborators::stubs::CapturingTerminal>()
            .map(|t| String::from_utf8_lossy(&t.output).into_owned())
            .unwrap_or_default()
    };

    match &result {
        Ok(outcome) => {
            if cli.json {
                println!("{}", serde_json::json!({"output": output, "error": null, "pos": outcome.pos}));
            } else if !output.is_empty() {
                print!("{output}");
            }
        }
        Err(err) => {
            if cli.json {
                println!("{}", serde_json::json!({"output": output, "error": err.to_string(), "pos": err.pos}));
            } else {
                if !output.is_empty() {
                    print!("{output}");
                }
                eprintln!("{err}");
            }
        }
    }

    std::process::exit(if result.is_err() { 1 } else { 0 });
}
