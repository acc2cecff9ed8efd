//! Multinomial Naive Bayes over real-valued (TF-IDF) features.

const ALPHA: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    log_prior: Vec<f64>,
    /// `[class][feature]` log P(feature | class).
    log_likelihood: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Train on `features` with class indices `targets` in `0..n_classes`.
    ///
    /// Classes without samples get a prior of negative infinity and are
    /// never predicted.
    #[must_use]
    pub fn fit(features: &[Vec<f64>], targets: &[usize], n_classes: usize) -> Self {
        let n_features = features.first().map_or(0, Vec::len);
        let mut class_count = vec![0_usize; n_classes];
        let mut feature_sum = vec![vec![0.0; n_features]; n_classes];

        for (row, &class) in features.iter().zip(targets) {
            class_count[class] += 1;
            for (acc, value) in feature_sum[class].iter_mut().zip(row) {
                *acc += value;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let n_samples = targets.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let smoothing = ALPHA * n_features as f64;

        let log_prior = class_count
            .iter()
            .map(|&c| {
                #[allow(clippy::cast_precision_loss)]
                let c = c as f64;
                (c / n_samples).ln()
            })
            .collect();

        let log_likelihood = feature_sum
            .iter()
            .map(|sums| {
                let total: f64 = sums.iter().sum::<f64>() + smoothing;
                sums.iter().map(|s| ((s + ALPHA) / total).ln()).collect()
            })
            .collect();

        Self {
            log_prior,
            log_likelihood,
        }
    }

    /// Joint log-likelihood of `x` for every class.
    #[must_use]
    pub fn scores(&self, x: &[f64]) -> Vec<f64> {
        self.log_prior
            .iter()
            .zip(&self.log_likelihood)
            .map(|(prior, likelihood)| {
                prior
                    + likelihood
                        .iter()
                        .zip(x)
                        .map(|(l, v)| l * v)
                        .sum::<f64>()
            })
            .collect()
    }

    /// Most likely class; ties go to the lowest index.
    #[must_use]
    pub fn predict(&self, x: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (class, score) in self.scores(x).into_iter().enumerate() {
            if score == f64::NEG_INFINITY || score.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((class, score));
            }
        }
        best.map(|(class, _)| class)
    }
}
