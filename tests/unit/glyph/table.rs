use super::*;
use crate::foundation::core::Vec2;

fn points(instructions: &[Instruction]) -> Vec<(char, f64, f64)> {
    instructions
        .iter()
        .map(|i| match *i {
            Instruction::MoveTo(Vec2 { x, y }) => ('M', x, y),
            Instruction::LineTo(Vec2 { x, y }) => ('L', x, y),
        })
        .collect()
}

#[test]
fn lookup_is_total_over_the_nine_symbols() {
    for symbol in Symbol::all() {
        let glyph = lookup(symbol);
        assert!((2..=8).contains(&glyph.len()), "{symbol}: {}", glyph.len());
        assert!(matches!(glyph[0], Instruction::MoveTo(_)));
    }
}

#[test]
fn digit_strokes_stay_on_the_anchor_grid() {
    for glyph in DIGIT_GLYPHS {
        for i in glyph {
            let d = i.offset();
            assert!([5.0, 20.0, 35.0].contains(&d.x));
            assert!([5.0, 20.0, 35.0].contains(&d.y));
        }
    }
}

#[test]
fn canonical_paths_are_literal() {
    assert_eq!(
        points(lookup_key("1").unwrap()),
        vec![('M', 20.0, 5.0), ('L', 20.0, 35.0)]
    );
    assert_eq!(
        points(lookup_key("2").unwrap()),
        vec![
            ('M', 5.0, 5.0),
            ('L', 35.0, 5.0),
            ('L', 35.0, 20.0),
            ('L', 5.0, 20.0),
            ('L', 5.0, 35.0),
            ('L', 35.0, 35.0),
        ]
    );
    assert_eq!(
        points(lookup_key("3").unwrap()),
        vec![
            ('M', 5.0, 5.0),
            ('L', 35.0, 5.0),
            ('L', 35.0, 20.0),
            ('L', 20.0, 20.0),
            ('L', 35.0, 20.0),
            ('L', 35.0, 35.0),
            ('L', 5.0, 35.0),
        ]
    );
    assert_eq!(
        points(lookup_key("4").unwrap()),
        vec![
            ('M', 5.0, 5.0),
            ('L', 5.0, 20.0),
            ('L', 35.0, 20.0),
            ('M', 35.0, 5.0),
            ('L', 35.0, 35.0),
        ]
    );
    assert_eq!(
        points(lookup_key("5").unwrap()),
        vec![
            ('M', 35.0, 5.0),
            ('L', 5.0, 5.0),
            ('L', 5.0, 20.0),
            ('L', 35.0, 20.0),
            ('L', 35.0, 35.0),
            ('L', 5.0, 35.0),
        ]
    );
    assert_eq!(
        points(lookup_key("6").unwrap()),
        vec![
            ('M', 35.0, 5.0),
            ('L', 5.0, 5.0),
            ('L', 5.0, 35.0),
            ('L', 35.0, 35.0),
            ('L', 35.0, 20.0),
            ('L', 5.0, 20.0),
        ]
    );
    assert_eq!(
        points(lookup_key("7").unwrap()),
        vec![('M', 5.0, 5.0), ('L', 35.0, 5.0), ('L', 5.0, 35.0)]
    );
    assert_eq!(
        points(lookup_key("8").unwrap()),
        vec![
            ('M', 5.0, 5.0),
            ('L', 35.0, 5.0),
            ('L', 35.0, 35.0),
            ('L', 5.0, 35.0),
            ('L', 5.0, 5.0),
            ('M', 5.0, 20.0),
            ('L', 35.0, 20.0),
        ]
    );
    assert_eq!(
        points(lookup_key("mine").unwrap()),
        vec![
            ('M', 20.0, 5.0),
            ('L', 20.0, 35.0),
            ('M', 5.0, 20.0),
            ('L', 35.0, 20.0),
            ('M', 5.0, 5.0),
            ('L', 35.0, 35.0),
            ('M', 35.0, 5.0),
            ('L', 5.0, 35.0),
        ]
    );
}

#[test]
fn border_box_is_a_closed_square() {
    assert_eq!(
        points(BORDER_BOX),
        vec![
            ('M', 0.0, 0.0),
            ('L', 39.0, 0.0),
            ('L', 39.0, 39.0),
            ('L', 0.0, 39.0),
            ('L', 0.0, 0.0),
        ]
    );
}

#[test]
fn unknown_keys_fail_with_unknown_symbol() {
    for key in [
        "0", "9", "-1", "2.5", "bomb", "", "01", " 1", "1 ", "+1", "008", "mine ", "Mine",
    ] {
        assert!(
            matches!(lookup_key(key), Err(CellGlyphError::UnknownSymbol(_))),
            "{key:?} should be rejected"
        );
    }
}

#[test]
fn digit_conversions_validate_range_and_integrality() {
    assert_eq!(Digit::try_from(3u8).unwrap().get(), 3);
    assert_eq!(Digit::try_from(8i64).unwrap().get(), 8);
    assert_eq!(Digit::try_from(1.0f64).unwrap().get(), 1);
    assert!(Digit::try_from(0u8).is_err());
    assert!(Digit::try_from(9i32).is_err());
    assert!(Digit::try_from(-1i64).is_err());
    assert!(Digit::try_from(256i64).is_err());
    assert!(Digit::try_from(2.5f64).is_err());
    assert!(Digit::try_from(f64::NAN).is_err());
}

#[test]
fn symbol_text_keys_round_trip() {
    for symbol in Symbol::all() {
        assert_eq!(symbol.to_string().parse::<Symbol>().unwrap(), symbol);
    }
}

#[test]
fn builtin_set_matches_static_table_and_exports() {
    let set = GlyphSet::builtin();
    for symbol in Symbol::all() {
        assert_eq!(set.get(symbol), lookup(symbol));
    }

    let reloaded = GlyphSet::from_raw(set.to_raw()).unwrap();
    assert_eq!(reloaded, set);
}

#[test]
fn glyph_set_json_requires_every_symbol() {
    let err = GlyphSet::from_json(
        r#"{"1": [{"command": "move", "x": 20, "y": 5}, {"command": "line", "x": 20, "y": 35}]}"#,
    )
    .unwrap_err();
    let CellGlyphError::Validation(msg) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(msg.contains("2, 3, 4, 5, 6, 7, 8, mine"), "{msg}");
}

#[test]
fn glyph_set_json_rejects_bad_keys_commands_and_bounds() {
    let mut raw = GlyphSet::builtin().to_raw();
    raw.insert("9".into(), vec![]);
    assert!(matches!(
        GlyphSet::from_raw(raw),
        Err(CellGlyphError::UnknownSymbol(_))
    ));

    let mut raw = GlyphSet::builtin().to_raw();
    let alias = raw["1"].clone();
    raw.insert("01".into(), alias);
    assert!(matches!(
        GlyphSet::from_raw(raw),
        Err(CellGlyphError::UnknownSymbol(ref k)) if k == "01"
    ));

    let mut raw = GlyphSet::builtin().to_raw();
    raw.get_mut("mine").unwrap()[1].command = "curve".into();
    assert!(matches!(
        GlyphSet::from_raw(raw),
        Err(CellGlyphError::UnknownInstruction(ref c)) if c == "curve"
    ));

    let mut raw = GlyphSet::builtin().to_raw();
    raw.get_mut("2").unwrap()[0].x = 45.0;
    assert!(matches!(
        GlyphSet::from_raw(raw),
        Err(CellGlyphError::Validation(_))
    ));

    let mut raw = GlyphSet::builtin().to_raw();
    raw.get_mut("5").unwrap().clear();
    assert!(matches!(
        GlyphSet::from_raw(raw),
        Err(CellGlyphError::Validation(_))
    ));
}
