use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Evaluation {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub no_show: bool,
    pub headline: Option<String>,
    pub comment: Option<String>,
    pub professionalism: Option<i32>,
    pub completeness: Option<i32>,
    pub efficiency: Option<i32>,
    pub overall_rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary of every evaluation a candidate has received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationAggregate {
    pub total_evaluations: i64,
    pub total_no_show: i64,
    pub min_overall_rating: Option<i32>,
    pub max_overall_rating: Option<i32>,
    pub avg_overall_rating: Option<f64>,
    pub avg_professionalism: Option<f64>,
    pub avg_completeness: Option<f64>,
    pub avg_efficiency: Option<f64>,
    pub one_stars: i64,
    pub two_stars: i64,
    pub three_stars: i64,
    pub four_stars: i64,
    pub five_stars: i64,
}

impl EvaluationAggregate {
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let mut stars = [0i64; 5];
        for e in evaluations {
            if let Some(slot) = usize::try_from(e.overall_rating - 1)
                .ok()
                .and_then(|i| stars.get_mut(i))
            {
                *slot += 1;
            }
        }

        Self {
            total_evaluations: evaluations.len() as i64,
            total_no_show: evaluations.iter().filter(|e| e.no_show).count() as i64,
            min_overall_rating: evaluations.iter().map(|e| e.overall_rating).min(),
            max_overall_rating: evaluations.iter().map(|e| e.overall_rating).max(),
            avg_overall_rating: mean(evaluations.iter().map(|e| Some(e.overall_rating))),
            avg_professionalism: mean(evaluations.iter().map(|e| e.professionalism)),
            avg_completeness: mean(evaluations.iter().map(|e| e.completeness)),
            avg_efficiency: mean(evaluations.iter().map(|e| e.efficiency)),
            one_stars: stars[0],
            two_stars: stars[1],
            three_stars: stars[2],
            four_stars: stars[3],
            five_stars: stars[4],
        }
    }
}

// Nulls are skipped; an all-null input has no mean.
fn mean(values: impl Iterator<Item = Option<i32>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0i64, 0i64), |(sum, count), v| (sum + v as i64, count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(overall: i32, professionalism: Option<i32>, no_show: bool) -> Evaluation {
        Evaluation {
            job_id: Uuid::new_v4(),
            candidate_id: Uuid::nil(),
            no_show,
            headline: None,
            comment: None,
            professionalism,
            completeness: None,
            efficiency: Some(3),
            overall_rating: overall,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_set_has_no_averages() {
        let stats = EvaluationAggregate::from_evaluations(&[]);
        assert_eq!(stats, EvaluationAggregate::default());
        assert_eq!(stats.avg_overall_rating, None);
    }

    #[test]
    fn histogram_accounts_for_every_evaluation() {
        let evals: Vec<Evaluation> = [5, 4, 4, 1, 3, 5, 2, 5]
            .iter()
            .map(|r| evaluation(*r, None, false))
            .collect();
        let stats = EvaluationAggregate::from_evaluations(&evals);

        let histogram_total = stats.one_stars
            + stats.two_stars
            + stats.three_stars
            + stats.four_stars
            + stats.five_stars;
        assert_eq!(histogram_total, stats.total_evaluations);
        assert_eq!(stats.five_stars, 3);
        assert_eq!(stats.four_stars, 2);

        let min = stats.min_overall_rating.unwrap() as f64;
        let max = stats.max_overall_rating.unwrap() as f64;
        let avg = stats.avg_overall_rating.unwrap();
        assert!(min <= avg && avg <= max);
        assert_eq!(min, 1.0);
        assert_eq!(max, 5.0);
    }

    #[test]
    fn averages_skip_missing_ratings() {
        let evals = vec![
            evaluation(5, Some(4), true),
            evaluation(3, None, false),
            evaluation(4, Some(2), false),
        ];
        let stats = EvaluationAggregate::from_evaluations(&evals);

        assert_eq!(stats.avg_professionalism, Some(3.0));
        assert_eq!(stats.avg_completeness, None);
        assert_eq!(stats.avg_efficiency, Some(3.0));
        assert_eq!(stats.avg_overall_rating, Some(4.0));
        assert_eq!(stats.total_no_show, 1);
    }

    #[test]
    fn single_five_star_evaluation() {
        let stats = EvaluationAggregate::from_evaluations(&[evaluation(5, Some(5), false)]);
        assert_eq!(stats.total_evaluations, 1);
        assert_eq!(stats.five_stars, 1);
        assert_eq!(stats.min_overall_rating, Some(5));
        assert_eq!(stats.max_overall_rating, Some(5));
    }
}
