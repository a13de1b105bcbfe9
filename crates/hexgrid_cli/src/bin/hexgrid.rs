use hexgrid_cli::{generate, init_tracing, open_in_background, Args, Command, USAGE};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = match Args::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let artifacts = generate(&args)?;
    println!("{}", artifacts.svg.display());
    println!("{}", artifacts.html.display());
    if let Some(pdf) = &artifacts.pdf {
        println!("{}", pdf.display());
    }

    // Outputs are complete; the viewer cannot change the outcome of the run.
    if args.open {
        if let Some(viewer) = open_in_background(artifacts.html.clone()) {
            let _ = viewer.join();
        }
    }

    Ok(())
}
