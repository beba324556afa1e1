use xqmj_engine::tile::{check_win, Color, Decomposition, Flush, Tile, Triple, WinCategory, WinResult};

fn tiles(codes: &[&str]) -> Vec<Tile> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

/// 五兵
#[test]
fn test_five_low_red() {
    let result = check_win(&tiles(&["R1", "R1", "R1", "R1", "R1"]));
    assert!(result.is_win());
    let win = result.win().unwrap();
    assert_eq!(win.category, WinCategory::FiveLow);
    assert_eq!(win.value, 50);
    assert_eq!(win.decomposition, None);
}

/// 对子 R7 + 顺子 {7,6,5}，全红
#[test]
fn test_pair_and_high_run_full_flush() {
    let result = check_win(&tiles(&["R7", "R6", "R5", "R7", "R7"]));
    let win = result.win().unwrap();
    assert_eq!(win.category, WinCategory::Standard(Flush::Full));
    assert_eq!(win.value, 20);
}

#[test]
fn test_mixed_colors_without_decomposition() {
    assert_eq!(
        check_win(&tiles(&["R1", "R2", "R3", "B1", "B2"])),
        WinResult::NotWinning
    );
}

#[test]
fn test_identical_triple_any_rank() {
    // 刻子不限等级与颜色
    let result = check_win(&tiles(&["B6", "B6", "B6", "R3", "R3"]));
    let win = result.win().unwrap();
    assert_eq!(win.value, 10);
    assert_eq!(
        win.decomposition,
        Some(Decomposition {
            pair: Tile::Red(3),
            triple: Triple::Identical(Tile::Black(6)),
        })
    );

    let result = check_win(&tiles(&["B1", "B1", "B1", "B1", "B5"]));
    assert_eq!(result, WinResult::NotWinning);

    // 四张兵加一张卒：对子兵 + 兵兵卒 不成组
    let result = check_win(&tiles(&["R1", "R1", "R1", "R1", "B1"]));
    assert_eq!(result, WinResult::NotWinning);
}

#[test]
fn test_low_run_positive_and_negative() {
    let result = check_win(&tiles(&["B4", "B3", "B2", "B1", "B1"]));
    let win = result.win().unwrap();
    assert_eq!(win.category, WinCategory::Standard(Flush::Full));
    assert_eq!(
        win.decomposition.unwrap().triple,
        Triple::Run { color: Color::Black, high: 4 }
    );

    // 5-4-3 不是固定顺子
    assert!(!check_win(&tiles(&["R5", "R4", "R3", "R1", "R1"])).is_win());
    // 顺子必须同色
    assert!(!check_win(&tiles(&["R4", "B3", "R2", "R1", "R1"])).is_win());
}

#[test]
fn test_pair_from_run_rank() {
    // R5 R5 R6 R7 R6：无论取哪一对，剩下的三张都不成组
    assert!(!check_win(&tiles(&["R5", "R5", "R6", "R7", "R6"])).is_win());
    // R5 R5 R6 R7 R5：对子 R5 + R5 R6 R7 顺子
    let result = check_win(&tiles(&["R5", "R5", "R6", "R7", "R5"]));
    assert_eq!(result.value(), 20);
}

#[test]
fn test_value_independent_of_order() {
    let a = check_win(&tiles(&["R7", "R6", "R5", "B2", "B2"]));
    let b = check_win(&tiles(&["B2", "R5", "B2", "R7", "R6"]));
    assert_eq!(a, b);
    assert_eq!(a.value(), 10);
}

#[test]
fn test_non_five_lengths() {
    for len in [0usize, 1, 4, 6] {
        let hand = vec![Tile::Red(1); len];
        assert_eq!(check_win(&hand), WinResult::NotWinning, "长度 {} 不应胡牌", len);
    }
}

#[test]
fn test_out_of_range_rank_never_wins() {
    // Red(0) 不能冒充 將
    let hand = [Tile::Red(0), Tile::Black(6), Tile::Black(5), Tile::Black(1), Tile::Black(1)];
    assert_eq!(check_win(&hand), WinResult::NotWinning);
    let hand = [Tile::Red(8), Tile::Red(1), Tile::Red(1), Tile::Red(1), Tile::Red(1)];
    assert_eq!(check_win(&hand), WinResult::NotWinning);
}
