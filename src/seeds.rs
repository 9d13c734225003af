//! Built-in question catalog, used when no SURVEY_CONFIG_PATH is given.

use crate::domain::Question;

fn q(prompt: &str, choices: &[&str], correct: &str) -> Question {
  Question {
    prompt: prompt.into(),
    choices: choices.iter().map(|c| (*c).to_string()).collect(),
    correct: Some(correct.into()),
  }
}

/// Question shown for figures the catalog does not know about.
pub fn placeholder_question() -> Question {
  Question {
    prompt: "Based on the figure, which option best answers the question?".into(),
    choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
    correct: None,
  }
}

/// The candy-chart figure set ("No Aids" naming, shuffled per participant).
pub fn builtin_questions() -> Vec<(String, Question)> {
  vec![
    ("Devin-Figure1-NoAids.png".into(), q(
      "Does Kit Kat have approximately more or less than 35% sugar?",
      &["More", "Less", "About 35%"],
      "Less",
    )),
    ("Devin-Figure2.png".into(), q(
      "Approximate the difference in sugar percentage between Milky Way and Twix.",
      &["~3%", "~8%", "~15%", "~20%"],
      "~8%",
    )),
    ("Devin-Figure3.png".into(), q(
      "Is there a larger gap in sugar percentage between Milky Way and Twix, or between Milky Way and Snickers?",
      &["Milky Way and Twix", "Milky Way and Snickers", "The gap is about the same"],
      "Milky Way and Snickers",
    )),
    ("Tim-Figure1-NoAids.png".into(), q(
      "What is the average win percent of pluribus candy?",
      &["55%", "45%", "35%", "60%"],
      "45%",
    )),
    ("Tim-Figure2.png".into(), q(
      "Which Candy is closest to 60% win percent?",
      &["Bar", "Chocolate", "Nougat", "Caramel"],
      "Nougat",
    )),
    ("Tim-Figure3.png".into(), q(
      "What is the win percent difference between fruity and hard candy?",
      &["5%", "10%", "20%", "30%"],
      "5%",
    )),
    ("Donovan-Figure1-NoAids.png".into(), q(
      "What sugar has the highest average Price Percentage?",
      &["Low", "Medium", "High", "All Equal"],
      "High",
    )),
    ("Donovan-Figure2.png".into(), q(
      "What is the Average Price Percentage of High Sugar candies?",
      &["0.35", "0.42", "0.8", "0.51"],
      "0.51",
    )),
    ("Donovan-Figure3.png".into(), q(
      "What is the Approximate difference between low and high sugar candies?",
      &["No Difference", "0.25", "0.03", "0.5"],
      "0.25",
    )),
    ("Branden-Figure1-NoAids.png".into(), q(
      "Which sugar category has the highest average popularity?",
      &["Low sugar", "Medium sugar", "High sugar", "All are equal"],
      "Medium sugar",
    )),
    ("Branden-Figure2.png".into(), q(
      "Medium sugar candies are approximately",
      &["Below 50%", "Exactly 50%", "Slightly above 50%", "Above 70%"],
      "Slightly above 50%",
    )),
    ("Branden-Figure3.png".into(), q(
      "About how much higher is Medium sugar compared to High sugar?",
      &["1-2%", "5-6%", "10%", "20%"],
      "1-2%",
    )),
  ]
}
