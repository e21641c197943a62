use argbind::{derive::*, Controller, Outcome};

#[derive(Debug, Default, Arguments)]
#[arguments(name = "copy", respect_order, separator = ':')]
struct CopyArguments {
    #[argument(short = "-s", long = "--source", description = "The file to copy.", required)]
    source: Option<String>,
    #[argument(short = "-d", long = "--destination", description = "Where to copy it.", required)]
    destination: Option<String>,
    #[argument(short = "-f", long = "--force", description = "Overwrite the destination.")]
    force: bool,
}

fn main() {
    let controller: Controller<CopyArguments> =
        Controller::new().expect("CopyArguments must be a valid argument declaration");
    let args: Vec<String> = std::env::args().skip(1).collect();

    match controller.parse_or_report(&args) {
        Some(Outcome::Parsed(arguments)) => println!("{arguments:?}"),
        Some(Outcome::Help { .. }) => {}
        None => std::process::exit(1),
    }
}
