//! Integration tests for the chart of accounts

use core_kernel::{AccountType, Amount, CoreError, Currency, NominalCode};
use domain_chart::{
    Account, Chart, ChartDefinition, ChartError, ChartNode, ChartSettings, ChartTree, CodeWidthPolicy,
    LedgerRow, NextCodeResolver,
};

fn code(s: &str) -> NominalCode {
    NominalCode::new(s).unwrap()
}

fn three_node_tree() -> ChartTree {
    ChartTree::with_root(
        ChartNode::new(Account::new(code("0000"), AccountType::REAL, "COA"))
            .with_child(ChartNode::new(Account::new(code("1000"), AccountType::ASSET, "Assets")))
            .with_child(ChartNode::new(Account::new(code("2000"), AccountType::LIABILITY, "Liabilities"))),
    )
}

fn sample_rows() -> Vec<LedgerRow> {
    [
        ("", "0000", "real", "COA", 110, 110),
        ("0000", "0001", "dr", "Balance Sheet", 100, 10),
        ("0001", "1000", "asset", "Assets", 100, 10),
        ("1000", "1200", "asset", "Current Assets", 100, 10),
        ("1200", "1210", "bank", "Bank", 100, 10),
        ("0000", "0002", "cr", "Profit And Loss", 10, 100),
        ("0002", "4000", "income", "Income", 0, 100),
        ("4000", "4100", "income", "Sales", 0, 100),
        ("0002", "6000", "expense", "Expenses", 10, 0),
        ("6000", "6100", "expense", "Overheads", 10, 0),
        ("6100", "6120", "expense", "Bank Charges", 10, 0),
    ]
    .into_iter()
    .map(|(p, c, t, n, d, cr)| LedgerRow::parse(p, c, t, n, d, cr).unwrap())
    .collect()
}

// ============= LOOKUP TESTS =============
mod lookup_tests {
    use super::*;

    #[test]
    fn test_find_by_code() {
        let tree = three_node_tree();

        let account = tree.find_by_code(&code("1000")).unwrap();
        assert_eq!(account.name(), "Assets");
        assert_eq!(account.account_type(), AccountType::ASSET);

        assert!(tree.find_by_code(&code("3000")).is_none());
    }

    #[test]
    fn test_parent_code() {
        let tree = three_node_tree();

        assert_eq!(tree.parent_code(&code("1000")), Some(&code("0000")));
        assert_eq!(tree.parent_code(&code("2000")), Some(&code("0000")));
        assert!(tree.parent_code(&code("0000")).is_none());
    }

    #[test]
    fn test_children_and_height() {
        let tree = three_node_tree();

        let children: Vec<&str> = tree
            .children(&code("0000"))
            .unwrap()
            .iter()
            .map(|a| a.code().as_str())
            .collect();

        assert_eq!(children, vec!["1000", "2000"]);
        assert_eq!(tree.children(&code("1000")).unwrap().len(), 0);
        assert!(tree.children(&code("3000")).is_none());
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_filter_by_sign_class() {
        let tree = ChartTree::from_rows(&sample_rows()).unwrap();

        let debit_codes: Vec<&str> = tree
            .filter(|a| a.account_type().is_debit())
            .into_iter()
            .map(|a| a.code().as_str())
            .collect();

        assert_eq!(
            debit_codes,
            vec!["0001", "1000", "1200", "1210", "6000", "6100", "6120"]
        );
    }
}

// ============= ROW TESTS =============
mod row_tests {
    use super::*;

    #[test]
    fn test_rows_rebuild_tree() {
        let tree = ChartTree::from_rows(&sample_rows()).unwrap();

        assert_eq!(tree.len(), 11);
        assert_eq!(tree.height(), 5);
        assert_eq!(tree.parent_code(&code("6120")), Some(&code("6100")));
        assert_eq!(tree.find_by_code(&code("0000")).unwrap().balance().unwrap(), 0);
        assert_eq!(tree.find_by_code(&code("1210")).unwrap().balance().unwrap(), 90);
    }

    #[test]
    fn test_pre_order_flattening_round_trips() {
        let rows = sample_rows();
        let tree = ChartTree::from_rows(&rows).unwrap();

        let flattened = tree.to_rows();

        assert_eq!(flattened, rows);
        assert_eq!(ChartTree::from_rows(&flattened).unwrap(), tree);
    }

    #[test]
    fn test_rows_must_start_with_root() {
        let mut rows = sample_rows();
        rows.swap(0, 1);

        assert!(matches!(ChartTree::from_rows(&rows), Err(ChartError::MissingRoot)));
    }
}

// ============= NEXT CODE TESTS =============
mod next_code_tests {
    use super::*;

    #[test]
    fn test_next_code_after_adding_child() {
        let mut chart = Chart::new("Codes", Currency::GBP);
        chart.add_account(code("0000"), AccountType::REAL, "COA", None).unwrap();
        chart
            .add_account(code("1800"), AccountType::ASSET, "Fixed Assets", Some(&code("0000")))
            .unwrap();

        let first = chart.next_code(&code("1800"), &code("1801")).unwrap();
        assert_eq!(first, "1801");

        chart
            .add_account(first, AccountType::ASSET, "Vehicles", Some(&code("1800")))
            .unwrap();

        let second = chart.next_code(&code("1800"), &code("1801")).unwrap();
        assert_eq!(second, "1802");
    }

    #[test]
    fn test_width_preserved_on_carry() {
        let tree = ChartTree::with_root(
            ChartNode::new(Account::new(code("0000"), AccountType::REAL, "COA"))
                .with_child(ChartNode::new(Account::new(code("0099"), AccountType::DR, "Last"))),
        );

        let preserved = NextCodeResolver::new(&tree).next(&code("0000"), &code("0001")).unwrap();
        let plain = NextCodeResolver::new(&tree)
            .with_policy(CodeWidthPolicy::Plain)
            .next(&code("0000"), &code("0001"))
            .unwrap();

        assert_eq!(preserved, "0100");
        assert_eq!(plain, "100");
    }

    #[test]
    fn test_chart_uses_configured_policy() {
        let settings = ChartSettings {
            code_width: CodeWidthPolicy::Plain,
            ..ChartSettings::default()
        };
        let tree = ChartTree::from_rows(&sample_rows()).unwrap();
        let chart = Chart::new("Plain", Currency::GBP)
            .with_settings(settings)
            .with_tree(tree)
            .unwrap();

        assert_eq!(chart.next_code(&code("0000"), &code("0001")).unwrap(), "3");
    }
}

// ============= DEFINITION TESTS =============
mod definition_tests {
    use super::*;

    const DEFINITION: &str = r#"{
        "code": "0000", "type": "REAL", "name": "COA",
        "children": [
            { "code": "0001", "type": "Dr", "name": "Balance Sheet", "children": [
                { "code": "1000", "type": "asset", "name": "Assets" },
                { "code": "2000", "type": "liability", "name": "Liabilities" }
            ]},
            { "code": "0002", "type": "cr", "name": "Profit And Loss", "children": [
                { "code": "4000", "type": "income", "name": "Income" },
                { "code": "6000", "type": "expense", "name": "Expenses" }
            ]}
        ]
    }"#;

    #[test]
    fn test_chart_from_definition() -> anyhow::Result<()> {
        let definition: ChartDefinition = serde_json::from_str(DEFINITION)?;

        let chart = Chart::from_definition("Sample", Currency::USD, &definition)?;

        assert_eq!(chart.name(), "Sample");
        assert_eq!(chart.currency(), Currency::USD);
        assert_eq!(chart.tree().len(), 7);
        assert_eq!(chart.parent_code(&code("6000")), Some(&code("0002")));
        assert_eq!(chart.account(&code("2000")).map(Account::account_type), Some(AccountType::LIABILITY));
        Ok(())
    }

    #[test]
    fn test_unknown_type_is_a_hard_failure() -> anyhow::Result<()> {
        let json = DEFINITION.replace("\"liability\"", "\"owed\"");
        let definition: ChartDefinition = serde_json::from_str(&json)?;

        let result = Chart::from_definition("Sample", Currency::GBP, &definition);

        assert!(matches!(
            result,
            Err(ChartError::Core(CoreError::UnknownAccountType(name))) if name == "owed"
        ));
        Ok(())
    }

    #[test]
    fn test_unique_names_checked_on_install() {
        let definition = ChartDefinition::new("0000", "real", "COA")
            .with_child(ChartDefinition::new("1000", "dr", "Sundry"))
            .with_child(ChartDefinition::new("2000", "cr", "Sundry"));
        let tree = definition.to_tree().unwrap();
        let strict = ChartSettings {
            unique_names: true,
            ..ChartSettings::default()
        };

        let result = Chart::new("Strict", Currency::GBP).with_settings(strict).with_tree(tree);

        assert!(matches!(result, Err(ChartError::DuplicateName(n)) if n == "Sundry"));
    }
}

// ============= BALANCE TESTS =============
mod balance_tests {
    use super::*;

    #[test]
    fn test_chart_balance() {
        let tree = ChartTree::from_rows(&sample_rows()).unwrap();
        let chart = Chart::new("Balances", Currency::GBP).with_tree(tree).unwrap();

        assert_eq!(chart.balance(&code("1210")).unwrap(), 90);
        assert_eq!(chart.balance(&code("4100")).unwrap(), 100);
        assert_eq!(chart.balance(&code("6120")).unwrap(), 10);
        assert_eq!(chart.balance(&code("0002")).unwrap(), 90);
        assert!(matches!(chart.balance(&code("9999")), Err(ChartError::AccountNotFound(_))));
    }

    #[test]
    fn test_removing_funded_branch_is_refused() {
        let tree = ChartTree::from_rows(&sample_rows()).unwrap();
        let mut chart = Chart::new("Balances", Currency::GBP).with_tree(tree).unwrap();

        let result = chart.remove_account(&code("6000"));

        assert!(matches!(result, Err(ChartError::AccountHasBalance { .. })));
        assert_eq!(chart.tree().len(), 11);
    }

    #[test]
    fn test_account_totals_and_titles() {
        let account = Account::new(code("1210"), AccountType::BANK, "Bank")
            .with_totals(Amount::new(100), Amount::new(10));

        assert_eq!(account.debit(), Amount::new(100));
        assert_eq!(account.credit(), Amount::new(10));
        assert_eq!(account.account_type().titles().unwrap(), ("Increase", "Decrease"));
    }
}

// ============= SERDE TESTS =============
mod serde_tests {
    use super::*;

    fn sample_chart() -> Chart {
        Chart::new("Serde", Currency::GBP)
            .with_tree(three_node_tree())
            .unwrap()
    }

    #[test]
    fn test_chart_json_round_trip() {
        let chart = sample_chart();

        let json = serde_json::to_string(&chart).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id(), chart.id());
        assert_eq!(back.tree(), chart.tree());
    }

    #[test]
    fn test_chart_json_with_duplicate_code_is_rejected() {
        let json = serde_json::to_string(&sample_chart())
            .unwrap()
            .replace(r#""code":"1000""#, r#""code":"0000""#);

        let err = serde_json::from_str::<Chart>(&json).unwrap_err();

        assert!(err.to_string().contains("Account already exists: 0000"));
    }

    #[test]
    fn test_tree_json_with_orphan_is_rejected() {
        let mut rows = three_node_tree().to_rows();
        rows[1].parent = Some(code("9999"));
        let json = serde_json::to_string(&rows).unwrap();

        assert!(serde_json::from_str::<ChartTree>(&json).is_err());
    }

    #[test]
    fn test_empty_tree_json() {
        let json = serde_json::to_string(&ChartTree::new()).unwrap();

        assert_eq!(json, "[]");
        assert!(serde_json::from_str::<ChartTree>(&json).unwrap().is_empty());
    }

    #[test]
    fn test_dummy_accounts_cannot_enter_a_chart() {
        let mut chart = sample_chart();
        let dummy = ChartTree::with_root(
            ChartNode::new(Account::new(code("0000"), AccountType::REAL, "COA"))
                .with_child(ChartNode::new(Account::new(code("1000"), AccountType::Dummy, "Untyped"))),
        );
        let rows = vec![
            LedgerRow::new(None, code("0000"), AccountType::REAL, "COA"),
            LedgerRow::new(Some(code("0000")), code("1000"), AccountType::Dummy, "Untyped"),
        ];

        assert!(matches!(
            chart.add_account(code("3000"), AccountType::Dummy, "Untyped", Some(&code("0000"))),
            Err(ChartError::Core(CoreError::DummyAccountType))
        ));
        assert!(matches!(
            Chart::new("Dummy", Currency::GBP).with_tree(dummy),
            Err(ChartError::Core(CoreError::DummyAccountType))
        ));
        assert!(matches!(
            ChartTree::from_rows(&rows),
            Err(ChartError::Core(CoreError::DummyAccountType))
        ));
        assert_eq!(chart.tree().len(), 3);
        assert!(serde_json::from_str::<Chart>(&serde_json::to_string(&chart).unwrap()).is_ok());
    }
}

// ============= PROPERTY TESTS =============
mod property_tests {
    use super::*;
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    fn fan_out(children: &[u32]) -> ChartTree {
        let mut root = ChartNode::new(Account::new(code("0"), AccountType::REAL, "COA"));
        for child in children {
            let child_code = NominalCode::new(format!("{child:06}")).unwrap();
            root = root.with_child(ChartNode::new(Account::new(child_code, AccountType::DR, "x")));
        }
        ChartTree::with_root(root)
    }

    proptest! {
        #[test]
        fn next_code_is_fresh_and_keeps_width(children in btree_set(1u32..999_998, 1..20)) {
            let children: Vec<u32> = children.into_iter().collect();
            let tree = fan_out(&children);

            let next = NextCodeResolver::new(&tree).next(&code("0"), &code("1")).unwrap();

            prop_assert!(!tree.has_account(&next));
            prop_assert_eq!(next.width(), 6);
            prop_assert_eq!(next.numeric_value(), u64::from(*children.iter().max().unwrap()) + 1);
        }

        #[test]
        fn rows_round_trip_any_fan_out(children in btree_set(1u32..999_999, 0..20)) {
            let children: Vec<u32> = children.into_iter().collect();
            let tree = fan_out(&children);

            let rebuilt = ChartTree::from_rows(&tree.to_rows()).unwrap();

            prop_assert_eq!(rebuilt.len(), children.len() + 1);
            prop_assert_eq!(rebuilt, tree);
        }
    }
}
