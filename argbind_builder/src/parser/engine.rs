use crate::api::run_chain;
use crate::constant::{HELP_LONG, HELP_SHORT};
use crate::model::{Value, ValueKind};
use crate::parser::{convert, ConversionError, ParseError, ParseFailure};
use crate::prelude::Target;
use crate::schema::{Binding, BindingId, Schema};
use crate::tokens::Token;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Complete,
    /// Help was requested at the level owned by this binding (`None` for the root).
    Help(Option<BindingId>),
}

/// Walks the tokens over the binding tree of a schema, assigning into a target.
///
/// Nested levels share one cursor, so a sub-command consumes tokens until it meets one that it cannot place.
pub(crate) struct Engine<'a> {
    schema: &'a Schema,
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(schema: &'a Schema, tokens: &'a [Token]) -> Self {
        Self {
            schema,
            tokens,
            cursor: 0,
        }
    }

    pub(crate) fn parse(mut self, target: &mut dyn Target) -> Result<Flow, ParseFailure> {
        let flow = self.parse_level(None, target)?;

        if flow == Flow::Complete {
            if let Some(token) = self.tokens.get(self.cursor) {
                return Err(self.failure(ParseError::UnknownArgument(token.to_string())));
            }
        }

        Ok(flow)
    }

    fn parse_level(
        &mut self,
        owner: Option<BindingId>,
        target: &mut dyn Target,
    ) -> Result<Flow, ParseFailure> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsing level '{}' at token {}.",
                self.schema.qualified_name(owner),
                self.cursor
            );
        }

        if self.schema.config().respect_order {
            self.parse_ordered(owner, target)
        } else {
            self.parse_unordered(owner, target)
        }
    }

    fn parse_unordered(
        &mut self,
        owner: Option<BindingId>,
        target: &mut dyn Target,
    ) -> Result<Flow, ParseFailure> {
        let schema = self.schema;
        let tokens = self.tokens;
        let separator = schema.separator();
        let level = schema.level(owner);
        let mut seen = vec![false; level.len()];

        while let Some(token) = tokens.get(self.cursor) {
            if self.is_help(token) {
                return Ok(Flow::Help(owner));
            }

            let word = match token.word() {
                Some(word) => word,
                None => {
                    return Err(self.failure(ParseError::UnknownArgument(token.to_string())));
                }
            };

            if let Some(index) = level
                .iter()
                .position(|id| schema.binding(*id).matches(word, separator))
            {
                seen[index] = true;

                if let Flow::Help(at) = self.bind(level[index], target)? {
                    return Ok(Flow::Help(at));
                }

                continue;
            }

            if self.is_flag_like(word) {
                if owner.is_some() {
                    // The flag may belong to an enclosing level.
                    break;
                }

                return Err(self.failure(ParseError::UnknownArgument(word.to_string())));
            }

            match level
                .iter()
                .enumerate()
                .position(|(index, id)| !seen[index] && schema.binding(*id).kind().is_leaf())
            {
                Some(index) => {
                    seen[index] = true;
                    self.bind_positional(schema.binding(level[index]), word, target)?;
                }
                None if owner.is_some() => break,
                None => {
                    return Err(self.failure(ParseError::UnknownArgument(word.to_string())));
                }
            }
        }

        for (index, id) in level.iter().enumerate() {
            if !seen[index] {
                self.absent(schema.binding(*id), target)?;
            }
        }

        Ok(Flow::Complete)
    }

    fn parse_ordered(
        &mut self,
        owner: Option<BindingId>,
        target: &mut dyn Target,
    ) -> Result<Flow, ParseFailure> {
        let schema = self.schema;
        let tokens = self.tokens;
        let separator = schema.separator();
        let level = schema.level(owner);

        for id in level {
            let binding = schema.binding(*id);
            let token = match tokens.get(self.cursor) {
                Some(token) => token,
                None => {
                    self.absent(binding, target)?;
                    continue;
                }
            };

            if self.is_help(token) {
                return Ok(Flow::Help(owner));
            }

            let word = match token.word() {
                Some(word) => word,
                None => {
                    return Err(self.failure(ParseError::UnknownArgument(token.to_string())));
                }
            };

            if binding.matches(word, separator) {
                if let Flow::Help(at) = self.bind(*id, target)? {
                    return Ok(Flow::Help(at));
                }
            } else if level
                .iter()
                .any(|other| other != id && schema.binding(*other).matches(word, separator))
            {
                return Err(self.failure(ParseError::IncorrectArgumentOrder {
                    expected: binding.display_names(),
                    received: word.to_string(),
                }));
            } else if self.is_flag_like(word) {
                if owner.is_none() {
                    return Err(self.failure(ParseError::UnknownArgument(word.to_string())));
                }

                // The flag may belong to an enclosing level; nothing more of this level follows.
                self.absent(binding, target)?;
            } else if binding.is_command() {
                return Err(self.failure(ParseError::IncorrectArgumentOrder {
                    expected: binding.display_names(),
                    received: word.to_string(),
                }));
            } else {
                self.bind_positional(binding, word, target)?;
            }
        }

        Ok(Flow::Complete)
    }

    // The cursor is on a token matching `id`.
    fn bind(&mut self, id: BindingId, target: &mut dyn Target) -> Result<Flow, ParseFailure> {
        let schema = self.schema;
        let binding = schema.binding(id);
        let offset = self.cursor;
        let key = self.tokens[offset].to_string();
        self.cursor += 1;

        if binding.is_command() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Entering command '{}'.", binding.display_names());
            }

            let flow = match target.enter(binding.slot()) {
                Some(nested) => self.parse_level(Some(id), nested)?,
                None => {
                    return Err(ParseFailure::new(
                        offset,
                        ParseError::InvalidArgumentType {
                            argument: key,
                            expected: ValueKind::Command,
                        },
                    ));
                }
            };

            if flow == Flow::Complete {
                self.execute(binding, target, offset)?;
            }

            return Ok(flow);
        }

        // A single word may carry both the key and its value (ex: a quoted `"-n=John"`).
        let inline = key
            .split_once(schema.separator().value())
            .map(|(name, value)| (name.to_string(), value.to_string()));
        let (key, raw) = match inline {
            Some((name, value)) => (name, Some(value)),
            None => {
                let raw = self.take_value(binding);
                (key, raw)
            }
        };
        let value = convert(binding, raw.as_deref())
            .map_err(|error| conversion_failure(binding, &key, offset, error))?;
        self.assign(binding, value, target, &key, offset)?;
        self.execute(binding, target, offset)?;
        Ok(Flow::Complete)
    }

    fn bind_positional(
        &mut self,
        binding: &Binding,
        word: &str,
        target: &mut dyn Target,
    ) -> Result<(), ParseFailure> {
        let offset = self.cursor;
        self.cursor += 1;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Positional '{word}' for '{}'.", binding.display_names());
        }

        let value = convert(binding, Some(word))
            .map_err(|error| conversion_failure(binding, word, offset, error))?;
        self.assign(binding, value, target, word, offset)?;
        self.execute(binding, target, offset)
    }

    // The cursor is just past the key token.
    fn take_value(&mut self, binding: &Binding) -> Option<String> {
        match self.tokens.get(self.cursor) {
            Some(Token::Separator(_)) => {
                self.cursor += 1;

                match self.tokens.get(self.cursor) {
                    // An explicit value is taken verbatim, even when it reads like a flag.
                    Some(Token::Word(word)) => {
                        self.cursor += 1;
                        Some(word.to_string())
                    }
                    _ => Some(String::default()),
                }
            }
            Some(Token::Word(word))
                if binding.kind() != ValueKind::Bool && !self.is_reserved(word) =>
            {
                self.cursor += 1;
                Some(word.to_string())
            }
            _ => None,
        }
    }

    fn assign(
        &self,
        binding: &Binding,
        value: Value,
        target: &mut dyn Target,
        argument: &str,
        offset: usize,
    ) -> Result<(), ParseFailure> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Assigning {value:?} to '{}'.", binding.display_names());
        }

        target.assign(binding.slot(), value).map_err(|_| {
            ParseFailure::new(
                offset,
                ParseError::InvalidArgumentType {
                    argument: argument.to_string(),
                    expected: binding.kind(),
                },
            )
        })
    }

    fn execute(
        &self,
        binding: &Binding,
        target: &mut dyn Target,
        offset: usize,
    ) -> Result<(), ParseFailure> {
        if !self.schema.config().execute_when_parsing {
            return Ok(());
        }

        run_chain(binding, target).map(|_| ()).map_err(|_| {
            ParseFailure::new(
                offset,
                ParseError::InvalidArgumentType {
                    argument: binding.display_names(),
                    expected: binding.kind(),
                },
            )
        })
    }

    fn absent(&self, binding: &Binding, target: &mut dyn Target) -> Result<(), ParseFailure> {
        if binding.is_required() {
            if self.help_ahead() {
                return Ok(());
            }

            return Err(self.failure(ParseError::MissingRequiredArgument(
                binding.display_names(),
            )));
        }

        if binding.kind() == ValueKind::Bool && binding.invert_boolean() {
            let argument = binding.display_names();
            self.assign(binding, Value::Bool(true), target, &argument, self.cursor)?;
        }

        Ok(())
    }

    fn failure(&self, error: ParseError) -> ParseFailure {
        ParseFailure::new(self.cursor, error)
    }

    fn is_help(&self, token: &Token) -> bool {
        self.schema.config().auto_help
            && matches!(token, Token::Word(word) if word == HELP_SHORT || word == HELP_LONG)
    }

    fn help_ahead(&self) -> bool {
        self.tokens[self.cursor..]
            .iter()
            .any(|token| self.is_help(token))
    }

    // Words that must never be swallowed as a value.
    fn is_reserved(&self, word: &str) -> bool {
        let help = word == HELP_SHORT || word == HELP_LONG;
        self.schema.matches_any(word) || (self.schema.config().auto_help && help)
    }

    // Negative numbers are values, not flags.
    fn is_flag_like(&self, word: &str) -> bool {
        let dashed = word.len() > 1 && word.starts_with('-') && word.parse::<f64>().is_err();
        let keyed = self
            .tokens
            .get(self.cursor + 1)
            .map_or(false, Token::is_separator);
        dashed || keyed
    }
}

fn conversion_failure(
    binding: &Binding,
    argument: &str,
    offset: usize,
    error: ConversionError,
) -> ParseFailure {
    let error = match error {
        ConversionError::MissingValue => ParseError::MissingValue(binding.display_names()),
        ConversionError::InvalidType { .. } => ParseError::InvalidArgumentType {
            argument: argument.to_string(),
            expected: binding.kind(),
        },
    };

    ParseFailure::new(offset, error)
}


#[cfg(test)]
mod tests {
    use super::util::*;
    use super::*;
    use crate::api::{Executor, FieldSpec};
    use crate::model::Separator;
    use crate::schema::util::{sample_fields, sample_schema};
    use crate::schema::ControllerConfig;
    use crate::tokens::tokenize;
    use rstest::rstest;

    fn parse(schema: &Schema, line: &str) -> (Result<Flow, ParseFailure>, Sample) {
        let tokens = tokenize(line, schema.separator());
        let mut sample = Sample::default();
        let result = Engine::new(schema, &tokens).parse(&mut sample);
        (result, sample)
    }

    fn start(url: &str, port: Option<i32>) -> Option<Start> {
        Some(Start {
            url: Some(url.to_string()),
            port,
        })
    }

    #[rstest]
    #[case("-n=John -v", Some("John"), true, None)]
    #[case("--name John", Some("John"), false, None)]
    #[case("-v --name = \"John Doe\"", Some("John Doe"), true, None)]
    #[case("-n=John -v=no", Some("John"), false, None)]
    #[case("-n=", Some(""), false, None)]
    #[case("-n=-v", Some("-v"), false, None)]
    #[case("-n=--help -v", Some("--help"), true, None)]
    #[case("\"-n=John\" -v", Some("John"), true, None)]
    #[case("\"--name=John Doe\"", Some("John Doe"), false, None)]
    #[case("\"-n=\"", Some(""), false, None)]
    #[case("John", Some("John"), false, None)]
    #[case("John yes", Some("John"), true, None)]
    #[case("-n John start -u http://x", Some("John"), false, start("http://x", None))]
    #[case("start -u=http://x -p 8080 -n John", Some("John"), false, start("http://x", Some(8080)))]
    #[case("start -u http://x -v -n John", Some("John"), true, start("http://x", None))]
    #[case("-n John start -p -5 -u x", Some("John"), false, start("x", Some(-5)))]
    #[case("-n John start http://x", Some("John"), false, start("http://x", None))]
    fn parse_unordered(
        #[case] line: &str,
        #[case] name: Option<&str>,
        #[case] verbose: bool,
        #[case] start: Option<Start>,
    ) {
        // Setup
        let schema = sample_schema(ControllerConfig::default());

        // Execute
        let (result, sample) = parse(&schema, line);

        // Verify
        assert_eq!(result, Ok(Flow::Complete));
        assert_eq!(
            sample,
            Sample {
                name: name.map(|n| n.to_string()),
                verbose,
                start,
            }
        );
    }

    #[rstest]
    #[case("-v", 1, ParseError::MissingRequiredArgument("-n, --name".to_string()))]
    #[case("", 0, ParseError::MissingRequiredArgument("-n, --name".to_string()))]
    #[case("-n John start -p 1", 5, ParseError::MissingRequiredArgument("-u".to_string()))]
    #[case("--unknown=1", 0, ParseError::UnknownArgument("--unknown".to_string()))]
    #[case("-n John -x", 2, ParseError::UnknownArgument("-x".to_string()))]
    #[case("-n John -v extra", 3, ParseError::UnknownArgument("extra".to_string()))]
    #[case("-n John = x", 2, ParseError::UnknownArgument("=".to_string()))]
    #[case("-n", 0, ParseError::MissingValue("-n, --name".to_string()))]
    #[case("-n -v", 0, ParseError::MissingValue("-n, --name".to_string()))]
    #[case("-n -h", 0, ParseError::MissingValue("-n, --name".to_string()))]
    #[case("-v=maybe -n John", 0, ParseError::InvalidArgumentType { argument: "-v".to_string(), expected: ValueKind::Bool })]
    #[case("-n John start -u x -p abc", 5, ParseError::InvalidArgumentType { argument: "-p".to_string(), expected: ValueKind::I32 })]
    #[case("John maybe", 1, ParseError::InvalidArgumentType { argument: "maybe".to_string(), expected: ValueKind::Bool })]
    #[case("-n John \"-v=maybe\"", 2, ParseError::InvalidArgumentType { argument: "-v".to_string(), expected: ValueKind::Bool })]
    fn parse_unordered_invalid(
        #[case] line: &str,
        #[case] offset: usize,
        #[case] error: ParseError,
    ) {
        // Setup
        let schema = sample_schema(ControllerConfig::default());

        // Execute
        let (result, _) = parse(&schema, line);

        // Verify
        assert_eq!(result, Err(ParseFailure::new(offset, error)));
    }

    #[rstest]
    #[case("-h")]
    #[case("--help")]
    #[case("-v -h")]
    #[case("-h -n John")]
    #[case("-v --help start")]
    fn parse_help_root(#[case] line: &str) {
        // Setup
        let schema = sample_schema(ControllerConfig::default());

        // Execute
        let (result, _) = parse(&schema, line);

        // Verify
        assert_eq!(result, Ok(Flow::Help(None)));
    }

    #[rstest]
    #[case("start -h")]
    #[case("start -p 1 --help")]
    #[case("-v start -h -u x")]
    fn parse_help_command(#[case] line: &str) {
        // Setup
        let schema = sample_schema(ControllerConfig::default());
        let start = schema.roots()[2];

        // Execute
        let (result, sample) = parse(&schema, line);

        // Verify
        assert_eq!(result, Ok(Flow::Help(Some(start))));
        assert!(sample.start.is_some());
    }

    #[test]
    fn parse_help_partial() {
        // Setup
        let schema = sample_schema(ControllerConfig::default());

        // Execute
        let (result, sample) = parse(&schema, "-v -h");

        // Verify
        assert_eq!(result, Ok(Flow::Help(None)));
        assert_eq!(sample.name, None);
        assert!(sample.verbose);
    }

    #[test]
    fn parse_help_disabled() {
        // Setup
        let schema = sample_schema(ControllerConfig::default().auto_help(false));

        // Execute
        let (result, _) = parse(&schema, "-n John -h");

        // Verify
        assert_eq!(
            result,
            Err(ParseFailure::new(
                2,
                ParseError::UnknownArgument("-h".to_string())
            ))
        );
    }

    #[rstest]
    #[case("-n John -v start -u x -p 1", Some("John"), true, start("x", Some(1)))]
    #[case("-n John -v", Some("John"), true, None)]
    #[case("John -v start x", Some("John"), true, start("x", None))]
    #[case("-n John", Some("John"), false, None)]
    fn parse_ordered(
        #[case] line: &str,
        #[case] name: Option<&str>,
        #[case] verbose: bool,
        #[case] start: Option<Start>,
    ) {
        // Setup
        let schema = sample_schema(ControllerConfig::default().respect_order(true));

        // Execute
        let (result, sample) = parse(&schema, line);

        // Verify
        assert_eq!(result, Ok(Flow::Complete));
        assert_eq!(
            sample,
            Sample {
                name: name.map(|n| n.to_string()),
                verbose,
                start,
            }
        );
    }

    #[rstest]
    #[case("-v -n John", 0, ParseError::IncorrectArgumentOrder { expected: "-n, --name".to_string(), received: "-v".to_string() })]
    #[case("-n John start -v", 2, ParseError::IncorrectArgumentOrder { expected: "-v".to_string(), received: "start".to_string() })]
    #[case("-n John -v other", 3, ParseError::IncorrectArgumentOrder { expected: "start".to_string(), received: "other".to_string() })]
    #[case("-n John -v start -p 1 -u x", 4, ParseError::IncorrectArgumentOrder { expected: "-u".to_string(), received: "-p".to_string() })]
    #[case("-n John -v start -u x -p 1 -x", 8, ParseError::UnknownArgument("-x".to_string()))]
    #[case("-v", 0, ParseError::IncorrectArgumentOrder { expected: "-n, --name".to_string(), received: "-v".to_string() })]
    #[case("", 0, ParseError::MissingRequiredArgument("-n, --name".to_string()))]
    fn parse_ordered_invalid(
        #[case] line: &str,
        #[case] offset: usize,
        #[case] error: ParseError,
    ) {
        // Setup
        let schema = sample_schema(ControllerConfig::default().respect_order(true));

        // Execute
        let (result, _) = parse(&schema, line);

        // Verify
        assert_eq!(result, Err(ParseFailure::new(offset, error)));
    }

    #[test]
    fn parse_ordered_leftover() {
        // Setup
        let fields = vec![FieldSpec::new("name", ValueKind::Str).short("-n")];
        let config = ControllerConfig::default().respect_order(true);
        let schema = Schema::extract("Sample", Some(config), fields).unwrap();

        // Execute
        let (result, _) = parse(&schema, "-n John extra");

        // Verify
        assert_eq!(
            result,
            Err(ParseFailure::new(
                2,
                ParseError::UnknownArgument("extra".to_string())
            ))
        );
    }

    #[rstest]
    #[case("-n John", true)]
    #[case("-n John --quiet", false)]
    #[case("-n John --quiet=yes", false)]
    #[case("-n John --quiet=no", true)]
    fn parse_invert_boolean(#[case] line: &str, #[case] expected: bool) {
        // Setup
        let mut fields = sample_fields();
        fields[1] = FieldSpec::new("verbose", ValueKind::Bool)
            .long("--quiet")
            .invert_boolean(true);
        let schema = Schema::extract("Sample", Some(ControllerConfig::default()), fields).unwrap();

        // Execute
        let (result, sample) = parse(&schema, line);

        // Verify
        assert_eq!(result, Ok(Flow::Complete));
        assert_eq!(sample.verbose, expected);
    }

    #[rstest]
    #[case(false, "John")]
    #[case(true, "JOHN")]
    fn parse_execute_when_parsing(#[case] execute_when_parsing: bool, #[case] expected: &str) {
        // Setup
        let mut fields = sample_fields();
        fields[0] = fields[0]
            .clone()
            .executor(Executor::transform(|name: String| name.to_uppercase()));
        let config = ControllerConfig::default().execute_when_parsing(execute_when_parsing);
        let schema = Schema::extract("Sample", Some(config), fields).unwrap();

        // Execute
        let (result, sample) = parse(&schema, "-n John");

        // Verify
        assert_eq!(result, Ok(Flow::Complete));
        assert_eq!(sample.name, Some(expected.to_string()));
    }

    #[test]
    fn parse_custom_separator() {
        // Setup
        let config = ControllerConfig::default().separator(Separator::new(':').unwrap());
        let schema = sample_schema(config);

        // Execute
        let (result, sample) = parse(&schema, "-n:a=b -v");

        // Verify
        assert_eq!(result, Ok(Flow::Complete));
        assert_eq!(sample.name, Some("a=b".to_string()));
        assert!(sample.verbose);
    }
}
