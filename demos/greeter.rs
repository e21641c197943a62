use argbind::{choice_value, derive::*, Controller, Outcome};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum Mood {
    #[default]
    Happy,
    Grumpy,
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "grumpy" => Ok(Mood::Grumpy),
            _ => Err(format!("unknown mood '{value}'")),
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Happy => write!(f, "happy"),
            Mood::Grumpy => write!(f, "grumpy"),
        }
    }
}

choice_value!(Mood);

#[derive(Default, Arguments)]
#[arguments(name = "greeter")]
struct Greeter {
    #[argument(short = "-n", long = "--name", description = "The name to greet.", required)]
    name: Option<String>,
    #[argument(short = "-c", long = "--count", description = "How many times to greet.")]
    count: Option<i16>,
    #[argument(short = "-q", long = "--quiet", description = "Only print the greeting.")]
    quiet: bool,
    #[argument(description = "One of 'happy' or 'grumpy'.")]
    mood: Option<Mood>,
    #[argument(
        long = "start",
        description = "Start the greeting service.",
        command,
        execute = announce
    )]
    start: Option<Start>,
}

#[derive(Default, Arguments)]
struct Start {
    #[argument(short = "-u", long = "--url", description = "Where to listen.", required)]
    url: Option<String>,
    #[argument(short = "-p", description = "The port to listen on.", inspect = check_port)]
    port: Option<i32>,
}

fn announce() {
    println!("Starting the greeting service.");
}

fn check_port(port: i32) {
    if !(1..=65535).contains(&port) {
        eprintln!("Port {port} is outside the usual range.");
    }
}

fn main() {
    let controller: Controller<Greeter> =
        Controller::new().expect("Greeter must be a valid argument declaration");
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut greeter = match controller.parse_or_report(&args) {
        Some(Outcome::Parsed(greeter)) => greeter,
        Some(Outcome::Help { .. }) => return,
        None => std::process::exit(1),
    };

    if let Err(error) = controller.execute(&mut greeter) {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let name = greeter.name.unwrap_or_default();
    let greeting = match greeter.mood.unwrap_or_default() {
        Mood::Happy => format!("Hello, {name}!"),
        Mood::Grumpy => format!("What do you want, {name}?"),
    };

    for _ in 0..greeter.count.unwrap_or(1) {
        if greeter.quiet {
            println!("{greeting}");
        } else {
            println!("{greeting} (mood: {})", greeter.mood.unwrap_or_default());
        }
    }

    if let Some(start) = greeter.start {
        println!(
            "Listening on {}:{}.",
            start.url.unwrap_or_default(),
            start.port.unwrap_or(8080)
        );
    }
}
