// ユーザー入力の解釈と評価の星表示

/// 入力1行の解釈結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0始まりの候補インデックス
    Choose(usize),
    Skip,
}

/// 入力を1始まりの番号として解釈する
///
/// 数値でない・範囲外・EOF はすべてスキップ扱い。
pub fn parse_selection(input: Option<&str>, suggestion_count: usize) -> Selection {
    let Some(option) = input.and_then(|line| line.trim().parse::<i64>().ok()) else {
        return Selection::Skip;
    };

    if option >= 1 && (option as u64) <= suggestion_count as u64 {
        Selection::Choose(option as usize - 1)
    } else {
        Selection::Skip
    }
}

/// 星の数: 基本1、0.3超で+1、0.9超でさらに+1
pub fn star_count(rating: f32) -> usize {
    let mut stars = 1;
    if rating > 0.3 {
        stars += 1;
    }
    if rating > 0.9 {
        stars += 1;
    }
    stars
}

pub fn rating_stars(rating: f32) -> String {
    "⭐️".repeat(star_count(rating))
}
