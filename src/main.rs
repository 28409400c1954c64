use clap::Parser;
use ico_convert::IconConverter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert a raster image into a 256x256 single-frame Windows ICO file.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Image to convert. Any format enabled on the image crate works.
    #[arg(default_value = "icon.png")]
    source: PathBuf,
    /// Destination ICO file. Created or replaced on success.
    #[arg(default_value = "app.ico")]
    target: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match IconConverter::new(&cli.source).convert_to_file(&cli.target) {
        Ok(()) => {
            println!(
                "Successfully converted {} to {}",
                cli.source.display(),
                cli.target.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error converting icon: {error}");
            ExitCode::FAILURE
        }
    }
}
