//! Edge case tests for selc-read.

#[cfg(test)]
mod tests {
    use crate::{read_all, read_string, ReadError};
    use selc_val::{Symbol, Value};

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_input() {
        assert!(read_all("").unwrap().is_empty());
        assert!(read_all(" \t\n,,,").unwrap().is_empty());
    }

    #[test]
    fn test_edge_single_char_symbol() {
        assert_eq!(read_string("x").unwrap(), Value::symbol("x"));
    }

    #[test]
    fn test_edge_long_symbol() {
        let name = "a".repeat(10000);
        assert_eq!(read_string(&name).unwrap(), Value::symbol(&name));
    }

    #[test]
    fn test_edge_deep_nesting() {
        let depth = 200;
        let mut text = String::new();
        for _ in 0..depth {
            text.push('(');
        }
        text.push('1');
        for _ in 0..depth {
            text.push(')');
        }
        let mut v = read_string(&text).unwrap();
        for _ in 0..depth {
            let items = v.as_list().expect("list").to_vec();
            assert_eq!(items.len(), 1);
            v = items[0].clone();
        }
        assert_eq!(v, Value::Int(1));
    }

    #[test]
    fn test_edge_stacked_discards() {
        // The discard reads the NEXT form, which may itself discard.
        assert_eq!(read_string("#_ #_ 1 2 3").unwrap(), Value::Int(3));
    }

    #[test]
    fn test_edge_discard_only_input() {
        assert!(read_all("#_ 1").unwrap().is_empty());
    }

    #[test]
    fn test_edge_comment_at_eof_without_newline() {
        assert_eq!(read_string("7 ; done"), Ok(Value::Int(7)));
        assert!(read_all("; done").unwrap().is_empty());
    }

    #[test]
    fn test_edge_crlf_comment() {
        assert_eq!(read_all("; a\r\n1").unwrap(), vec![Value::Int(1)]);
    }

    #[test]
    fn test_edge_number_adjacent_to_delimiter() {
        assert_eq!(
            read_string("(1)").unwrap(),
            Value::list(vec![Value::Int(1)])
        );
        assert_eq!(
            read_string("[0xFF]").unwrap(),
            Value::vector(vec![Value::Int(255)])
        );
    }

    #[test]
    fn test_edge_keyword_number_like() {
        // `:5` scans as a keyword token, not a number.
        assert_eq!(read_string(":5").unwrap(), Value::keyword("5"));
    }

    #[test]
    fn test_edge_quote_chain() {
        // ''x → (quote (quote x))
        let v = read_string("''x").unwrap();
        assert_eq!(
            v,
            Value::list(vec![
                Value::symbol("quote"),
                Value::list(vec![Value::symbol("quote"), Value::symbol("x")]),
            ])
        );
    }

    #[test]
    fn test_edge_syntax_quote_then_fn_literal() {
        // The two scoped environments are independent.
        let v = read_string("`x").unwrap();
        assert_eq!(
            v,
            Value::list(vec![
                Value::symbol("quote"),
                Value::Sym(Symbol::qualified("user", "x")),
            ])
        );
        let f = read_string("#(inc %)").unwrap();
        assert_eq!(f.as_list().unwrap()[0], Value::symbol("fn*"));
    }

    // ==================== SPEC SCENARIOS ====================

    #[test]
    fn test_scenario_list_of_ints() {
        assert_eq!(
            read_string("(1 2 3)").unwrap(),
            Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_scenario_map_and_odd_map() {
        let m = read_string("{:a 1 :b 2}").unwrap();
        match m {
            Value::Map(m) => assert_eq!(m.len(), 2),
            other => panic!("expected map, got {:?}", other),
        }
        assert_eq!(read_string("{:a}"), Err(ReadError::OddMapForms));
    }

    #[test]
    fn test_scenario_commas_are_whitespace() {
        assert_eq!(
            read_string("[ 1, 2 ,,, 3 ]").unwrap(),
            Value::vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_scenario_number_formats() {
        assert_eq!(read_string("0xFF").unwrap(), Value::Int(255));
        assert_eq!(read_string("16rFF").unwrap(), Value::Int(255));
        assert_eq!(
            read_string("3/4").unwrap(),
            Value::Ratio(selc_val::Ratio::new(3, 4).unwrap())
        );
        assert_eq!(read_string("1.5e2").unwrap(), Value::Float(150.0));
        assert_eq!(
            read_string("+-1"),
            Err(ReadError::InvalidNumber("+-1".to_string()))
        );
    }

    #[test]
    fn test_scenario_inst() {
        use chrono::{Datelike, Timelike};
        let v = read_string("#inst \"1985-04-12T23:20:50.520Z\"").unwrap();
        match v {
            Value::Inst(t) => {
                assert_eq!((t.year(), t.month(), t.day()), (1985, 4, 12));
                assert_eq!((t.hour(), t.minute(), t.second()), (23, 20, 50));
                assert_eq!(t.timestamp_subsec_millis(), 520);
            }
            other => panic!("expected inst, got {:?}", other),
        }
        assert!(matches!(
            read_string("#inst \"1985-13-01\""),
            Err(ReadError::Tag(_))
        ));
    }

    #[test]
    fn test_scenario_fn_literal_arity() {
        let v = read_string("#(+ % %2)").unwrap();
        let items = v.as_list().unwrap();
        assert_eq!(items[0], Value::symbol("fn*"));
        assert_eq!(items[1].as_vector().unwrap().len(), 2);
        assert_eq!(read_string("#( #(%) )"), Err(ReadError::NestedFnLiteral));
    }

    // ==================== PRINT/READ ROUND TRIPS ====================

    #[test]
    fn test_round_trip_literal_values() {
        for text in [
            "nil",
            "true",
            "42",
            "-7N",
            "3/4",
            "1.5",
            "2.5M",
            "\\newline",
            "\"a\\nb\"",
            ":user/k",
            "other/sym",
            "(1 [2 #{3}] {:a 4})",
            "#inst \"1985-04-12T23:20:50.520Z\"",
            "#uuid \"f81d4fae-7dec-11d0-a765-00a0c91e6bf6\"",
            "#queue [1 2]",
            "#\"[a-z]+\"",
        ] {
            let v = read_string(text).unwrap();
            let reread = read_string(&v.to_string()).unwrap();
            assert_eq!(v, reread, "round trip failed for {:?}", text);
        }
    }

    // ------------------------------------------------------------------------
    // PROPERTY-BASED TESTS - Using proptest for arbitrary inputs
    // ------------------------------------------------------------------------

    fn atom_strategy() -> impl proptest::strategy::Strategy<Value = Value> {
        use proptest::prelude::*;
        prop_oneof![
            Just(Value::Nil),
            any::<bool>().prop_map(Value::Bool),
            // i64::MIN has no positive magnitude, so the printed form
            // would not read back.
            ((-i64::MAX)..=i64::MAX).prop_map(Value::Int),
            any::<f64>()
                .prop_filter("finite floats only", |x| x.is_finite())
                .prop_map(Value::Float),
            "[a-z][a-z0-9*+!_?-]{0,8}"
                .prop_filter("not a special literal", |s| {
                    s != "nil" && s != "true" && s != "false"
                })
                .prop_map(|s| Value::symbol(&s)),
            "[a-z][a-z0-9*+!_?-]{0,8}".prop_map(|s| Value::keyword(&s)),
            "[ -~]{0,12}".prop_map(Value::string),
            proptest::char::range('a', 'z').prop_map(Value::Char),
        ]
    }

    fn value_strategy() -> impl proptest::strategy::Strategy<Value = Value> {
        use proptest::prelude::*;
        atom_strategy().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::vector),
                proptest::collection::vec((inner.clone(), inner.clone()), 0..3)
                    .prop_map(Value::map_from),
                proptest::collection::vec(inner, 0..3).prop_map(Value::set_from),
            ]
        })
    }

    #[test]
    fn test_property_print_read_round_trip() {
        use proptest::prelude::*;

        proptest!(|(v in value_strategy())| {
            let printed = v.to_string();
            let reread = read_string(&printed);
            prop_assert_eq!(reread, Ok(v), "printed form was {:?}", printed);
        });
    }

    #[test]
    fn test_property_whitespace_and_commas_are_idempotent() {
        use proptest::prelude::*;

        proptest!(|(
            items in proptest::collection::vec(0i64..1000, 0..6),
            seps in proptest::collection::vec("[ \t\n,]{1,4}", 7),
        )| {
            let mut text = String::from("[");
            for (i, item) in items.iter().enumerate() {
                text.push_str(&seps[i]);
                text.push_str(&item.to_string());
            }
            text.push_str(&seps[6]);
            text.push(']');
            let expected = Value::vector(items.into_iter().map(Value::Int).collect());
            prop_assert_eq!(read_string(&text), Ok(expected));
        });
    }

    #[test]
    fn test_property_tokens_stop_at_terminators() {
        use proptest::prelude::*;

        proptest!(|(name in "[a-z]{1,10}")| {
            let text = format!("({})", name);
            let v = read_string(&text).unwrap();
            prop_assert_eq!(v, Value::list(vec![Value::symbol(&name)]));
        });
    }
}
