use crate::clifford::{Clifford, Dirac};
use crate::expr::Expr;
use crate::tensor::Tensor;

/// Result of normalizing a word: `(-1)^negative * product(scalars) * word`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NormalWord {
    pub negative: bool,
    pub scalars: Vec<Expr>,
    pub word: Vec<Clifford>,
}

/// Drive a word of same-label generators to its fixed point under the local rules:
/// drop `One`, anticommute `Gamma5` to the front, cancel `Gamma5^2`, and replace adjacent
/// identical gammas by their metric. Each firing either shortens the word or moves a `Gamma5`
/// strictly left, so the loop terminates.
pub(crate) fn normalize_word(label: u8, factors: Vec<Clifford>) -> NormalWord {
    let mut word = factors;
    let mut negative = false;
    let mut scalars = Vec::new();
    let mut rounds = 0usize;

    loop {
        word.retain(|c| !c.is_one());
        let mut fired = false;

        if word.len() >= 2 {
            for end in (0..word.len() - 1).rev() {
                for i in (0..=end).rev() {
                    if !word[i].is_gamma5() && word[i + 1].is_gamma5() {
                        word.swap(i, i + 1);
                        negative = !negative;
                        fired = true;
                    }
                }
            }
        }

        while word.len() >= 2 && word[0].is_gamma5() && word[1].is_gamma5() {
            word.drain(0..2);
            fired = true;
        }

        let mut i = 0;
        while i + 1 < word.len() {
            if let (Dirac::Gamma(a), Dirac::Gamma(b)) = (&word[i].kind, &word[i + 1].kind) {
                if a == b {
                    scalars.push(Tensor::Minkowski { pos_sig: false }.build(vec![a.clone(), b.clone()]));
                    word[i] = Clifford::one(label);
                    word[i + 1] = Clifford::one(label);
                    fired = true;
                    i += 2;
                    continue;
                }
            }
            i += 1;
        }

        if !fired {
            break;
        }
        rounds += 1;
    }

    if rounds > 0 {
        tracing::trace!(target: "clifford", label, rounds, len = word.len(), negative, "normalized word");
    }
    if word.is_empty() {
        word.push(Clifford::one(label));
    }
    NormalWord {
        negative,
        scalars,
        word,
    }
}
