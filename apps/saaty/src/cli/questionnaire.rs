//! # Interactive Questionnaire
//!
//! The form flow on a line-oriented terminal: respondent, phenomenon, number
//! of criteria, one label per criterion, then one question per pair. Invalid
//! answers are asked again; end of input aborts with an I/O error.

use saaty_core::primitives::{MAX_FIELD_LENGTH, MAX_LABEL_LENGTH};
use saaty_core::{
    Assessment, Criteria, CriteriaBounds, Favors, Intensity, Judgment, Judgments, Locale, Pair,
    Readiness, SaatyError,
};
use std::io::{BufRead, Write};

/// Prompt texts in one language.
struct Prompts {
    respondent: &'static str,
    phenomenon: &'static str,
    count: &'static str,
    criterion: &'static str,
    compare: &'static str,
    choice: &'static str,
    favored: &'static str,
    invalid: &'static str,
    too_long: &'static str,
    duplicate: &'static str,
}

const fn prompts(locale: Locale) -> Prompts {
    match locale {
        Locale::En => Prompts {
            respondent: "Your name, profile or e-mail",
            phenomenon: "Phenomenon or aspect under analysis",
            count: "How many criteria do you want to compare",
            criterion: "Name of criterion",
            compare: "How would you compare",
            choice: "Choice",
            favored: "Which one is more important",
            invalid: "Invalid answer, try again.",
            too_long: "Answer too long, maximum bytes:",
            duplicate: "That criterion was already entered.",
        },
        Locale::Es => Prompts {
            respondent: "Su nombre, perfil o correo electrónico",
            phenomenon: "Fenómeno o aspecto objeto de análisis",
            count: "¿Cuántos criterios desea comparar",
            criterion: "Nombre del criterio",
            compare: "¿Cómo compararía",
            choice: "Opción",
            favored: "¿Cuál es más importante",
            invalid: "Respuesta no válida, intente de nuevo.",
            too_long: "Respuesta demasiado larga, máximo de bytes:",
            duplicate: "Ese criterio ya fue ingresado.",
        },
    }
}

fn io_error(e: std::io::Error) -> SaatyError {
    SaatyError::Io(e.to_string())
}

/// Everything the questionnaire collected, with the computed weights.
#[derive(Debug, Clone)]
pub struct QuestionnaireOutcome {
    pub respondent: String,
    pub phenomenon: String,
    pub assessment: Assessment,
}

/// A questionnaire session over any line reader and writer.
pub struct Questionnaire<R, W> {
    input: R,
    output: W,
    bounds: CriteriaBounds,
    locale: Locale,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W, bounds: CriteriaBounds, locale: Locale) -> Self {
        Self {
            input,
            output,
            bounds,
            locale,
        }
    }

    /// Ask every question and compute the weights.
    pub fn run(mut self) -> Result<QuestionnaireOutcome, SaatyError> {
        let p = prompts(self.locale);

        let respondent = self.ask_text(p.respondent, MAX_FIELD_LENGTH)?;
        let phenomenon = self.ask_text(p.phenomenon, MAX_FIELD_LENGTH)?;
        let count = self.ask_count()?;
        let criteria = self.ask_criteria(count)?;

        let mut judgments = Judgments::new();
        for pair in criteria.pairs() {
            let judgment = self.ask_judgment(&criteria, pair)?;
            judgments.insert(pair.row(), pair.column(), judgment)?;
        }

        let assessment = Assessment::compute(criteria, &judgments)?;
        Ok(QuestionnaireOutcome {
            respondent,
            phenomenon,
            assessment,
        })
    }

    /// Print `question`, read one trimmed line.
    fn prompt(&mut self, question: &str) -> Result<String, SaatyError> {
        write!(self.output, "{}: ", question).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(SaatyError::Io("unexpected end of input".to_string()));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: &str) -> Result<(), SaatyError> {
        writeln!(self.output, "{}", text).map_err(io_error)
    }

    /// A non-empty answer of at most `max` bytes.
    fn ask_text(&mut self, question: &str, max: usize) -> Result<String, SaatyError> {
        loop {
            let answer = self.prompt(question)?;
            if answer.is_empty() {
                self.say(prompts(self.locale).invalid)?;
            } else if answer.len() > max {
                self.say(&format!("{} {}", prompts(self.locale).too_long, max))?;
            } else {
                return Ok(answer);
            }
        }
    }

    fn ask_count(&mut self) -> Result<usize, SaatyError> {
        let question = format!(
            "{} ({}-{})?",
            prompts(self.locale).count,
            self.bounds.min(),
            self.bounds.max()
        );
        loop {
            match self.prompt(&question)?.parse::<usize>() {
                Ok(count) if self.bounds.contains(count) => return Ok(count),
                _ => self.say(prompts(self.locale).invalid)?,
            }
        }
    }

    /// Fill the label fields until the set is ready to build a matrix.
    fn ask_criteria(&mut self, count: usize) -> Result<Criteria, SaatyError> {
        let mut labels = vec![String::new(); count];
        loop {
            let empty = match Criteria::readiness(&labels, self.bounds)? {
                Readiness::Ready(criteria) => return Ok(criteria),
                Readiness::Deferred { empty } => empty,
            };
            for index in empty {
                let label = self.ask_label(index, &labels)?;
                if let Some(slot) = labels.get_mut(index) {
                    *slot = label;
                }
            }
        }
    }

    /// One label that is not already in `labels`.
    fn ask_label(&mut self, index: usize, labels: &[String]) -> Result<String, SaatyError> {
        let question = format!("{} {}", prompts(self.locale).criterion, index + 1);
        loop {
            let label = self.ask_text(&question, MAX_LABEL_LENGTH)?;
            if labels.contains(&label) {
                self.say(prompts(self.locale).duplicate)?;
            } else {
                return Ok(label);
            }
        }
    }

    fn ask_judgment(&mut self, criteria: &Criteria, pair: Pair) -> Result<Judgment, SaatyError> {
        let p = prompts(self.locale);
        let a = criteria.get(pair.row()).unwrap_or_default();
        let b = criteria.get(pair.column()).unwrap_or_default();

        self.say("")?;
        self.say(&format!("{} {} / {}?", p.compare, a, b))?;
        for (index, intensity) in Intensity::ALL.iter().enumerate() {
            self.say(&format!("  [{}] {}", index + 1, intensity.label(self.locale)))?;
        }

        let intensity = loop {
            match parse_choice(&self.prompt(p.choice)?) {
                Some(intensity) => break intensity,
                None => self.say(p.invalid)?,
            }
        };

        if intensity == Intensity::Equal {
            return Ok(Judgment::favoring_row(intensity));
        }

        let question = format!("{}? [1] {}  [2] {}", p.favored, a, b);
        let favors = loop {
            match self.prompt(&question)?.as_str() {
                "" | "1" => break Favors::Row,
                "2" => break Favors::Column,
                _ => self.say(p.invalid)?,
            }
        };

        Ok(Judgment { intensity, favors })
    }
}

/// A menu number (1-5) or a level identifier or label.
fn parse_choice(answer: &str) -> Option<Intensity> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| Intensity::ALL.get(index))
            .copied();
    }
    answer.parse().ok()
}

// =============================================================================
// TESTS
// =============================================================================
