
#[cfg(test)]
mod tests {
    use crate::error::FetchError;
    use crate::models::dashboard_view::Trend;
    use crate::models::pagination::{
        page_count, OrderBy, OrderDirection, Pagination, SearchParams, Sort,
    };
    use crate::models::{CoinsPage, Stats};
    use crate::render::dashboard::{build_view, render_text};
    use crate::render::{coin_row, sparkline, trend};
    use crate::state::{Completion, Snapshot, ViewState};
    use crate::tests::fake::coin;
    use crate::utils::coinranking::decode_coins;
    use crate::utils::{format_change, format_usd, group_thousands, sanitize_color};

    const COINS_BODY: &str = r##"{
        "status": "success",
        "data": {
            "stats": {
                "total": 3,
                "totalCoins": 31000,
                "totalMarkets": 40000,
                "totalExchanges": 180,
                "totalMarketCap": "1200000000000",
                "total24hVolume": "50000000000"
            },
            "coins": [
                {
                    "uuid": "Qwsogvtv82FCd",
                    "symbol": "BTC",
                    "name": "Bitcoin",
                    "color": "#f7931A",
                    "iconUrl": "https://cdn.coinranking.com/bOabBYkcX/bitcoin_btc.svg",
                    "marketCap": "600000000000",
                    "price": "30123.4567",
                    "listedAt": 1330214400,
                    "tier": 1,
                    "change": "-0.55",
                    "rank": 1,
                    "sparkline": ["30000.1", null, "30100.2", "30123.4567"],
                    "lowVolume": false,
                    "coinrankingUrl": "https://coinranking.com/coin/Qwsogvtv82FCd+bitcoin-btc",
                    "24hVolume": "20000000000",
                    "btcPrice": "1"
                },
                {
                    "uuid": "razxDUgYGNAdQ",
                    "symbol": "ETH",
                    "name": "Ethereum",
                    "color": null,
                    "iconUrl": "https://cdn.coinranking.com/rk4RKHOuW/eth.svg",
                    "price": "1850.12",
                    "change": "2.10",
                    "rank": 2,
                    "sparkline": [],
                    "coinrankingUrl": "https://coinranking.com/coin/razxDUgYGNAdQ+ethereum-eth"
                },
                {
                    "uuid": "Qwsogvtv82FCd",
                    "symbol": "BTC",
                    "name": "Bitcoin again",
                    "price": "1",
                    "change": "0",
                    "rank": 3,
                    "sparkline": null
                }
            ]
        }
    }"##;

    #[test]
    fn test_page_two_of_ten() {
        let pagination = Pagination {
            current: 2,
            page_size: 10,
        };
        assert_eq!(pagination.limit_offset().unwrap(), (10, 10));
    }

    #[test]
    fn test_offset_is_page_size_times_previous_pages() {
        for page_size in 1..=50u32 {
            for current in 1..=20u32 {
                let (limit, offset) = Pagination { current, page_size }.limit_offset().unwrap();
                assert_eq!(limit, page_size);
                assert_eq!(offset, page_size * (current - 1));
            }
        }
    }

    #[test]
    fn test_zero_page_or_size_is_rejected() {
        assert!(Pagination { current: 0, page_size: 10 }.limit_offset().is_err());
        assert!(Pagination { current: 1, page_size: 0 }.limit_offset().is_err());
        assert!(Pagination { current: u32::MAX, page_size: u32::MAX }
            .limit_offset()
            .is_err());
    }

    #[test]
    fn test_paging_keeps_sort_and_sorting_resets_offset() {
        let sort = Sort {
            order_by: OrderBy::Price,
            order_direction: OrderDirection::Asc,
        };
        let sorted = SearchParams::default().sorted(sort);
        let paged = sorted
            .paged(Pagination {
                current: 3,
                page_size: 25,
            })
            .unwrap();
        assert_eq!(paged.offset, 50);
        assert_eq!(paged.order_by, Some(OrderBy::Price));
        assert_eq!(paged.current_page(), 3);

        let resorted = paged.sorted(Sort {
            order_by: OrderBy::Change,
            order_direction: OrderDirection::Desc,
        });
        assert_eq!(resorted.offset, 0);
        assert_eq!(resorted.limit, 25);
    }

    #[test]
    fn test_search_params_query_shape() {
        let params = SearchParams::default();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "limit": 10, "offset": 0 })
        );
        let sorted = params.sorted(Sort {
            order_by: OrderBy::Volume24h,
            order_direction: OrderDirection::Desc,
        });
        assert_eq!(
            serde_json::to_value(&sorted).unwrap(),
            serde_json::json!({
                "limit": 10,
                "offset": 0,
                "orderBy": "24hVolume",
                "orderDirection": "desc"
            })
        );
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.567), "$1,234.57");
        assert_eq!(format_usd(0.5), "$0.50");
        assert_eq!(format_usd(-0.5), "-$0.50");
        assert_eq!(format_usd(1.005), "$1.01");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1234567.0), "$1,234,567.00");
        assert_eq!(format_usd(0.000012), "$0.00");
        assert_eq!(format_usd(f64::NAN), "-");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some("-0.55")), "-0.55%");
        assert_eq!(format_change(Some("2.10")), "2.10%");
        assert_eq!(format_change(Some("0.00")), "0.00%");
        assert_eq!(format_change(Some("n/a")), "-");
        assert_eq!(format_change(None), "-");
    }

    #[test]
    fn test_trend_by_sign_of_change() {
        assert_eq!(trend(Some(0.01)), Trend::Up);
        assert_eq!(trend(Some(0.0)), Trend::Down);
        assert_eq!(trend(Some(-3.2)), Trend::Down);
        assert_eq!(trend(None), Trend::Down);
    }

    #[test]
    fn test_sanitize_color() {
        assert_eq!(sanitize_color(Some("#f7931A")), Some("#f7931A".to_string()));
        assert_eq!(sanitize_color(Some("#abc")), Some("#abc".to_string()));
        assert_eq!(sanitize_color(Some("red")), None);
        assert_eq!(sanitize_color(Some("#12345")), None);
        assert_eq!(sanitize_color(None), None);
    }

    #[test]
    fn test_decode_coins() {
        let page = decode_coins(COINS_BODY.as_bytes()).unwrap();
        assert_eq!(page.stats, Stats { total: 3, total_coins: 31000 });
        // the repeated uuid is dropped
        assert_eq!(page.coins.len(), 2);

        let btc = &page.coins[0];
        assert_eq!(btc.name, "Bitcoin");
        assert_eq!(btc.price, Some(30123.4567));
        assert_eq!(btc.change.as_deref(), Some("-0.55"));
        assert_eq!(btc.change_value(), Some(-0.55));
        assert_eq!(btc.sparkline, vec![Some(30000.1), None, Some(30100.2), Some(30123.4567)]);

        let eth = &page.coins[1];
        assert_eq!(eth.color, None);
        assert!(eth.sparkline.is_empty());
    }

    #[test]
    fn test_change_text_is_shown_as_sent() {
        let page = decode_coins(COINS_BODY.as_bytes()).unwrap();
        let eth = coin_row(&page.coins[1]);
        assert_eq!(eth.change.text, "2.10%");
        assert_eq!(eth.change.trend, Trend::Up);

        let body = br#"{"status":"success","data":{"stats":{"total":1,"totalCoins":1},
            "coins":[{"uuid":"a","rank":1,"name":"A","symbol":"A","change":"0.00","sparkline":[]}]}}"#;
        let flat = coin_row(&decode_coins(body).unwrap().coins[0]);
        assert_eq!(flat.change.text, "0.00%");
        assert_eq!(flat.change.trend, Trend::Down);
    }

    #[test]
    fn test_decode_coins_failures() {
        let rejected = br#"{"status":"fail","data":null,"message":"Invalid offset"}"#;
        match decode_coins(rejected) {
            Err(FetchError::Rejected(message)) => assert_eq!(message, "Invalid offset"),
            other => panic!("expected rejection, got {:?}", other),
        }

        match decode_coins(b"<html>busy</html>") {
            Err(FetchError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_page() {
        let body = br#"{"status":"success","data":{"stats":{"total":0,"totalCoins":0},"coins":[]}}"#;
        let page = decode_coins(body).unwrap();
        assert!(page.coins.is_empty());
        assert_eq!(page.stats.total, 0);
    }

    #[test]
    fn test_recent_points_keeps_last_five_known() {
        let series = vec![Some(1.0), None, Some(2.0), Some(3.0), Some(4.0), None, Some(5.0), Some(6.0)];
        assert_eq!(sparkline::recent_points(&series), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(sparkline::recent_points(&[None, None]).is_empty());
    }

    #[test]
    fn test_sparkline_layout() {
        let points = sparkline::layout(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(points.first(), Some(&(5.0, 35.0)));
        assert_eq!(points.last(), Some(&(95.0, 5.0)));

        // flat series sits mid-box
        let flat = sparkline::layout(&[7.0, 7.0]);
        assert!(flat.iter().all(|&(_, y)| y == 20.0));

        assert!(sparkline::layout(&[]).is_empty());
        assert_eq!(sparkline::glyphs(&[1.0, 5.0]), "▁█");
        assert_eq!(sparkline::svg_points(&[1.0, 5.0]), "5.00,35.00 27.50,5.00");
    }

    #[test]
    fn test_coin_row() {
        let row = coin_row(&coin(1, 30123.4567, 2.5));
        assert_eq!(row.key, "coin-1");
        assert_eq!(row.rank, "#1");
        assert_eq!(row.icon_width, 32);
        assert_eq!(row.price.text, "$30,123.46");
        assert_eq!(row.price.color.as_deref(), Some("#f7931A"));
        assert_eq!(row.change.text, "2.5%");
        assert_eq!(row.change.trend, Trend::Up);
        assert_eq!(row.change.color, "success");
        assert_eq!(row.sparkline.glyphs.chars().count(), 3);

        let falling = coin_row(&coin(2, 10.0, -1.0));
        assert_eq!(falling.change.trend, Trend::Down);
        assert_eq!(falling.change.color, "error");
    }

    #[test]
    fn test_empty_page_renders_zero_rows() {
        let snapshot = Snapshot {
            stats: Some(Stats::default()),
            ..Snapshot::default()
        };
        let view = build_view(&snapshot, &SearchParams::default(), false);
        assert!(view.rows.is_empty());
        assert_eq!(view.pagination.total, 0);
        assert_eq!(view.top_coin.value, "-");

        let text = render_text(&view);
        assert!(text.contains("Total Coins: 0"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_view_cards_and_pagination() {
        let snapshot = Snapshot {
            coins: vec![coin(11, 5.0, 1.0), coin(12, 4.0, -1.0)],
            stats: Some(Stats {
                total: 25,
                total_coins: 31000,
            }),
            first_coin: Some(coin(1, 30000.0, 0.3)),
            fetched_at: None,
        };
        let params = SearchParams::with_limit(10)
            .paged(Pagination {
                current: 2,
                page_size: 10,
            })
            .unwrap();
        let view = build_view(&snapshot, &params, true);
        assert_eq!(view.total_coins.value, "31000");
        assert_eq!(view.top_coin.title, "#1 coin");
        assert_eq!(view.top_coin.value, "Coin 1");
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.pagination.current, 2);
        assert_eq!(view.pagination.pages, 3);
        assert!(view.loading);

        let text = render_text(&view);
        assert!(text.contains("#11"));
        assert!(text.contains("▼ -1%"));
        assert!(text.contains("[loading]"));
    }

    fn page(ranks: std::ops::RangeInclusive<u32>) -> CoinsPage {
        let coins: Vec<_> = ranks.map(|rank| coin(rank, 1.0, 1.0)).collect();
        let total = coins.len() as u64;
        CoinsPage {
            coins,
            stats: Stats {
                total,
                total_coins: total,
            },
        }
    }

    #[test]
    fn test_loading_tracks_latest_requests() {
        let mut state = ViewState::new(SearchParams::default());
        assert!(!state.loading());

        let list = state.begin_list_fetch(SearchParams::default());
        let first = state.begin_first_coin_fetch();
        assert!(state.loading());

        state.complete_first_coin_fetch(first, Ok(Some(coin(1, 1.0, 1.0)))).unwrap();
        // list still outstanding
        assert!(state.loading());

        state.complete_list_fetch(list, Ok(page(1..=10))).unwrap();
        assert!(!state.loading());
        assert_eq!(state.snapshot().coins.len(), 10);
        assert!(state.snapshot().first_coin.is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ViewState::new(SearchParams::default());
        let page_one = state.begin_list_fetch(SearchParams::with_limit(10));
        let page_two = state.begin_list_fetch(
            SearchParams::with_limit(10)
                .paged(Pagination {
                    current: 2,
                    page_size: 10,
                })
                .unwrap(),
        );

        let applied = state.complete_list_fetch(page_two, Ok(page(11..=20))).unwrap();
        assert_eq!(applied, Completion::Applied);

        let stale = state.complete_list_fetch(page_one, Ok(page(1..=10))).unwrap();
        assert_eq!(stale, Completion::Superseded);
        assert_eq!(state.snapshot().coins[0].rank, 11);
        assert_eq!(state.params().offset, 10);
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_completion_does_not_clear_loading() {
        let mut state = ViewState::new(SearchParams::default());
        let old = state.begin_list_fetch(SearchParams::default());
        let _new = state.begin_list_fetch(SearchParams::default());
        state.complete_list_fetch(old, Ok(page(1..=10))).unwrap();
        assert!(state.loading());
        assert!(state.snapshot().coins.is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut state = ViewState::new(SearchParams::default());
        let ok = state.begin_list_fetch(SearchParams::default());
        state.complete_list_fetch(ok, Ok(page(1..=10))).unwrap();
        let before = state.snapshot();

        let failing = state.begin_list_fetch(SearchParams::default());
        let result = state.complete_list_fetch(
            failing,
            Err(FetchError::Rejected("rate limited".to_string())),
        );
        assert!(result.is_err());
        assert!(!state.loading());
        assert_eq!(*state.snapshot(), *before);
    }
}
