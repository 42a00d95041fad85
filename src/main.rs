// Tern: parser front-end for the Tern programming language

use std::fs;
use std::path::Path;

use tern::parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("tern");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.tn>", program_name);
        eprintln!();
        eprintln!("Try the bundled demo to see the supported language surface:");
        eprintln!("  {} demos/demo.tn", program_name);
        std::process::exit(1);
    }

    let source_file = &args[1];

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(source_file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: Failed to read '{}': {}", source_file, err);
            std::process::exit(1);
        }
    };

    println!("{}", source);

    eprintln!("Parsing {}...", source_file);
    let program = parser::parse(&source)?;
    eprintln!(
        "Parsed successfully. Found {} top-level statements.",
        program.body.len()
    );

    println!("Program AST:");
    println!("{:#?}", program);

    Ok(())
}
