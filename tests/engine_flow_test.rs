use xqmj_engine::{
    DiscardSlot, Engine, EngineConfig, EngineError, GameState, Recommendation, RecordingMode, Tile,
};

fn record_codes(engine: &mut Engine, codes: &[&str]) {
    for code in codes {
        engine.record_input(code).unwrap();
    }
}

fn discards(recommendation: Recommendation) -> Vec<xqmj_engine::DiscardCandidate> {
    match recommendation {
        Recommendation::Discards(candidates) => candidates,
        Recommendation::Win(win) => panic!("不应该已经胡牌：{:?}", win),
    }
}

/// 从重置开始：手牌 R7 R6 R5 R4，摸 R3
#[test]
fn test_run_hand_end_to_end() {
    let mut engine = Engine::new();
    engine.reset();
    record_codes(&mut engine, &["R7", "R6", "R5", "R4"]);
    engine.record_tile(Tile::Red(3)).unwrap();

    let state = engine.state();
    assert_eq!(
        state.hand.as_slice(),
        &[Tile::Red(7), Tile::Red(6), Tile::Red(5), Tile::Red(4)]
    );
    assert_eq!(state.drawn, Some(Tile::Red(3)));
    assert_eq!(state.wall_remaining, 27);

    // 打出 R4 后 R7 R6 R5 已成顺子，等 R3 成对
    let waits = engine.waiting_tiles(&[Tile::Red(7), Tile::Red(6), Tile::Red(5), Tile::Red(3)]);
    assert_eq!(waits.len(), 1);
    assert_eq!(waits[0].tile, Tile::Red(3));
    assert_eq!(waits[0].remaining, 1);
    assert_eq!(waits[0].win_value, 20);
    assert!((waits[0].ev - 20.0 / 27.0).abs() < 1e-9);

    let candidates = discards(engine.recommend_current().unwrap());
    assert_eq!(candidates.len(), 5);
    assert_eq!(candidates[0].tile, Tile::Red(4));
    assert_eq!(candidates[1].tile, Tile::Red(3));
    assert!((candidates[0].total_ev - candidates[1].total_ev).abs() < 1e-12);
    for loser in &candidates[2..] {
        assert_eq!(loser.total_ev, 0.0);
        assert!(loser.waits.is_empty());
    }
}

/// R3 已出现在河里时，打 R4 的待牌已无未见张数，R3 成为唯一最优
#[test]
fn test_seen_pair_tile_changes_top_discard() {
    let mut engine = Engine::new();
    engine.select_seat(2).unwrap();
    engine.record_tile(Tile::Red(3)).unwrap();
    engine.self_mode().unwrap();
    record_codes(&mut engine, &["R7", "R6", "R5", "R4", "R3"]);

    assert_eq!(engine.remaining_count(Tile::Red(3)), 0);
    let candidates = discards(engine.recommend_current().unwrap());
    assert_eq!(candidates[0].tile, Tile::Red(3));
    assert!(candidates[0].total_ev > 0.0);
    assert!(candidates[1..].iter().all(|c| c.total_ev < candidates[0].total_ev));
}

#[test]
fn test_undo_restores_each_prior_state() {
    let mut engine = Engine::new();
    let mut states: Vec<GameState> = vec![engine.state().clone()];

    record_codes(&mut engine, &["B7", "B6", "B5", "B1"]);
    states.push(engine.state().clone());
    engine.record_tile(Tile::Black(1)).unwrap();
    states.push(engine.state().clone());
    engine.discard_from_hand(DiscardSlot::Hand(0)).unwrap();
    states.push(engine.state().clone());
    engine.select_seat(1).unwrap();
    engine.record_tile(Tile::Black(6)).unwrap();
    states.push(engine.state().clone());
    // 失败的操作不压入历史
    engine.form_meld(1, 0, Tile::Black(7), &[Tile::Black(5), Tile::Black(4)]).unwrap_err();

    // 只比较记牌字段：路由字段不随撤销恢复
    let accounting = |s: &GameState| (s.wall_remaining, s.hand.clone(), s.drawn, s.rivers.clone(), s.melds.clone());

    engine.undo();
    assert_eq!(accounting(engine.state()), accounting(&states[3]));
    engine.undo();
    assert_eq!(accounting(engine.state()), accounting(&states[2]));
    engine.undo();
    assert_eq!(accounting(engine.state()), accounting(&states[1]));
    for _ in 0..4 {
        engine.undo();
    }
    assert_eq!(accounting(engine.state()), accounting(&states[0]));

    // 空历史撤销什么也不做
    engine.undo();
    assert_eq!(accounting(engine.state()), accounting(&states[0]));
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn test_meld_round_trip_through_protocol() {
    let mut engine = Engine::new();
    record_codes(&mut engine, &["R1", "R1", "B2", "B2"]);
    engine.select_seat(3).unwrap();
    engine.record_input("炮").unwrap();
    let wall_before = engine.state().wall_remaining;

    // 上家打出的炮被自己吃，补充 R3 R4
    engine.begin_meld(3, 0).unwrap();
    assert_eq!(
        engine.discard_from_hand(DiscardSlot::Drawn),
        Err(EngineError::MeldPending)
    );
    engine.record_input("傌").unwrap();
    engine.record_input("俥").unwrap();
    engine.commit_meld().unwrap();

    let state = engine.state();
    assert_eq!(state.mode, RecordingMode::Record);
    assert!(state.river(3).is_empty());
    assert_eq!(state.drawn, Some(Tile::Red(2)));
    assert_eq!(state.melds_of(0)[0].added.as_slice(), &[Tile::Red(3), Tile::Red(4)]);
    assert_eq!(state.wall_remaining, wall_before - 2);
    assert_eq!(engine.remaining_count(Tile::Red(2)), 1);

    // 吃进的牌成为摸牌，必须打出
    engine.discard_from_hand(DiscardSlot::Drawn).unwrap();
    assert_eq!(engine.state().river(0), &[Tile::Red(2)]);

    engine.undo();
    engine.undo();
    assert_eq!(engine.state().river(3), &[Tile::Red(2)]);
    assert!(engine.state().melds_of(0).is_empty());
}

#[test]
fn test_zero_supplement_configuration() {
    let config = EngineConfig::from_json_str(r#"{ "meld_supplements": 0, "eaten_tiles_safe": true }"#).unwrap();
    let mut engine = Engine::with_config(config);
    engine.select_seat(1).unwrap();
    engine.record_tile(Tile::Black(2)).unwrap();

    engine.begin_meld(1, 0).unwrap();
    engine.commit_meld().unwrap();
    assert_eq!(engine.state().melds_of(2).len(), 1);
    assert_eq!(engine.state().wall_remaining, 31);
    // 被吃走的牌仍是现物
    assert_eq!(engine.safe_tiles(), vec![Tile::Black(2)]);

    let mut strict = Engine::new();
    strict.select_seat(1).unwrap();
    strict.record_tile(Tile::Black(2)).unwrap();
    strict.form_meld(1, 0, Tile::Black(2), &[Tile::Black(3), Tile::Black(4)]).unwrap();
    assert!(strict.safe_tiles().is_empty());
}

#[test]
fn test_rejected_operations_keep_state() {
    let mut engine = Engine::new();
    record_codes(&mut engine, &["R7", "B7", "R1", "B1", "R1"]);
    let before = engine.state().clone();
    let history = engine.history_len();

    let attempts = [
        engine.record_tile(Tile::Red(2)).map(|_| ()),
        engine.record_input("X").map(|_| ()),
        engine.discard_from_hand(DiscardSlot::Hand(9)).map(|_| ()),
        engine.delete_river_entry(2, 0).map(|_| ()),
        engine.delete_river_entry(7, 0).map(|_| ()),
        engine.commit_meld().map(|_| ()),
        engine.cancel_meld(true).map(|_| ()),
        engine.begin_meld(1, 0).map(|_| ()),
    ];
    assert!(attempts.iter().all(|r| r.is_err()));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.history_len(), history);
}

/// 不在目录中的牌（等级越界）被拒绝，记牌不受影响
#[test]
fn test_out_of_catalog_tiles_rejected() {
    let mut engine = Engine::new();
    record_codes(&mut engine, &["R7", "R6", "R5"]);
    let before = engine.state().clone();
    let history = engine.history_len();

    let attempts = [
        engine.record_tile(Tile::Red(0)).map(|_| ()),
        engine.record_tile(Tile::Black(8)).map(|_| ()),
        engine.form_meld(3, 0, Tile::Red(9), &[Tile::Red(4), Tile::Red(3)]).map(|_| ()),
    ];
    for attempt in &attempts {
        assert!(matches!(attempt, Err(EngineError::InvalidTile(_))), "{:?}", attempt);
    }
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.history_len(), history);

    // 分析函数对无效的牌不给结果
    assert!(engine.waiting_tiles(&[Tile::Red(7), Tile::Red(6), Tile::Red(5), Tile::Red(0)]).is_empty());
    assert!(discards(engine.recommend_discards(&[
        Tile::Red(7),
        Tile::Red(6),
        Tile::Red(5),
        Tile::Red(4),
        Tile::Black(0),
    ]))
    .is_empty());

    // 將 的未见张数不被 Red(0) 占用
    assert_eq!(engine.remaining_count(Tile::Black(7)), 1);
    engine.record_tile(Tile::Black(7)).unwrap();
    assert_eq!(engine.remaining_count(Tile::Black(7)), 0);

    // 反序列化同样拒绝越界等级
    assert!(serde_json::from_str::<Tile>(r#"{"Black":9}"#).is_err());
}
