//! 1ファイル名の照合内訳

use fabric_match_common::{normalize_with, MatchMethod, MatchResult, Matcher};

#[derive(Debug, Clone)]
pub struct RankedCode {
    pub code: String,
    pub confidence: f64,
    pub method: MatchMethod,
}

#[derive(Debug, Clone)]
pub struct Inspection {
    pub candidate: String,
    pub normalized: String,
    /// 手動対応表が指すカタログコード
    pub override_hit: Option<String>,
    pub ranking: Vec<RankedCode>,
    pub result: MatchResult,
}

pub fn inspect(matcher: &Matcher, file_name: &str, top: usize) -> Inspection {
    let candidate = matcher.extract(file_name);
    let normalized = normalize_with(&candidate, &matcher.config().normalize);
    let override_hit = matcher.lookup_override(&candidate).map(String::from);
    let ranking = matcher
        .rank(&candidate, top)
        .into_iter()
        .map(|(code, score)| RankedCode {
            code: code.to_string(),
            confidence: score.confidence,
            method: score.method,
        })
        .collect();
    let result = matcher.match_candidate(file_name, candidate.clone());

    Inspection {
        candidate,
        normalized,
        override_hit,
        ranking,
        result,
    }
}

impl Inspection {
    pub fn print(&self, threshold: f64) {
        println!("  候補: {}", self.candidate);
        println!("  正規化: {}", self.normalized);
        match &self.override_hit {
            Some(code) => println!("  手動対応表: {}", code),
            None => println!("  手動対応表: なし"),
        }

        println!("\n  上位スコア (閾値 {:.2}):", threshold);
        if self.ranking.is_empty() {
            println!("    （スコアのあるコードなし）");
        }
        for (i, r) in self.ranking.iter().enumerate() {
            let mark = if r.confidence >= threshold { "✔" } else { " " };
            println!(
                "    {} {:>2}. {:<30} {:.3} ({})",
                mark,
                i + 1,
                r.code,
                r.confidence,
                r.method
            );
        }

        println!();
        match (&self.result.code, self.result.method) {
            (Some(code), Some(method)) => println!(
                "✅ 結果: {} ({}, {:.2})",
                code, method, self.result.confidence
            ),
            _ => println!("❌ 結果: 一致なし"),
        }
    }
}
