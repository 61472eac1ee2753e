use anyhow::Result;
use std::io::{self, BufRead};

use mood_journal::classifier::MoodClassifier;
use mood_journal::sentiment::LexiconScorer;

/// Score each argument, or each line of stdin when no arguments are given
fn main() -> Result<()> {
    let scorer = LexiconScorer::new()?;
    let classifier = MoodClassifier::new(scorer);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let lines: Vec<String> = if args.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<_>>()?
    } else {
        args
    };

    for line in lines.iter().filter(|line| !line.trim().is_empty()) {
        let classification = classifier.classify(line)?;
        println!(
            "{:+.4}\t{:<8}\t{}\t{}",
            classification.compound,
            classification.mood.as_str(),
            classification.emoji,
            line
        );
    }

    Ok(())
}
