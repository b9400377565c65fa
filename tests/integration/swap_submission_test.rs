// Swap Submission Integration Test
// Drives confirmed swaps through submission, the transaction queue and the
// broadcast stage using in-memory wallet and broadcaster fakes

use anyhow::Result;
use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};
use wallet_swap_core::models::{
    BroadcastReceipt, FutureSwap, InstantSwap, SignedTransaction, SwapIntent, SwapToken, TokenId,
};
use wallet_swap_core::services::{
    Broadcaster, CompositeSwapRequest, FutureSwapRequest, PoolRoute, ScreenPresence, SkipReason,
    SubmitOutcome, SwapSubmissionService, TransactionQueue, TransactionQueueEntry, WalletAccount,
};
use wallet_swap_core::{SwapConfig, WalletError};

#[derive(Default)]
struct FakeAccount {
    composite: Mutex<Vec<CompositeSwapRequest>>,
    future: Mutex<Vec<FutureSwapRequest>>,
}

#[async_trait]
impl WalletAccount for FakeAccount {
    async fn get_script(&self) -> wallet_swap_core::Result<String> {
        Ok("0014deadbeef".to_string())
    }

    async fn composite_swap(
        &self,
        request: CompositeSwapRequest,
    ) -> wallet_swap_core::Result<SignedTransaction> {
        let mut requests = self.composite.lock().unwrap();
        requests.push(request);
        Ok(SignedTransaction {
            txid: format!("composite-{}", requests.len()),
            hex: "0400".to_string(),
        })
    }

    async fn future_swap(
        &self,
        request: FutureSwapRequest,
    ) -> wallet_swap_core::Result<SignedTransaction> {
        let mut requests = self.future.lock().unwrap();
        requests.push(request);
        Ok(SignedTransaction {
            txid: format!("future-{}", requests.len()),
            hex: "0400".to_string(),
        })
    }
}

/// Broadcaster that can hold a broadcast open until released
#[derive(Default)]
struct FakeBroadcaster {
    sent: Mutex<Vec<String>>,
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: Option<Arc<Notify>>,
}

#[async_trait]
impl Broadcaster for FakeBroadcaster {
    async fn broadcast(&self, transaction: &SignedTransaction) -> wallet_swap_core::Result<String> {
        if let Some(tx) = self.started.lock().unwrap().take() {
            let _ = tx.send(());
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }
        self.sent.lock().unwrap().push(transaction.txid.clone());
        Ok(transaction.txid.clone())
    }
}

struct Harness {
    account: Arc<FakeAccount>,
    broadcaster: Arc<FakeBroadcaster>,
    queue: Arc<TransactionQueue>,
    submission: SwapSubmissionService,
}

fn harness_with(broadcaster: FakeBroadcaster) -> Harness {
    let account = Arc::new(FakeAccount::default());
    let broadcaster = Arc::new(broadcaster);
    let queue = Arc::new(TransactionQueue::new(account.clone(), broadcaster.clone()));
    let submission = SwapSubmissionService::new(queue.clone(), SwapConfig::default());
    Harness {
        account,
        broadcaster,
        queue,
        submission,
    }
}

fn harness() -> Harness {
    harness_with(FakeBroadcaster::default())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn instant_swap() -> SwapIntent {
    SwapIntent::Instant(InstantSwap {
        token_from: SwapToken::new("0_unified", "DFI", Some(dec("500"))),
        token_to: SwapToken::new("2", "dETH", None),
        amount_from: dec("100"),
        amount_to: dec("50"),
        slippage: Some(dec("0.01")),
        estimated_fee: dec("0.0001"),
        pools: vec!["5".to_string(), "6".to_string()],
        conversion_required: false,
    })
}

fn future_swap(is_source_loan_token: bool) -> SwapIntent {
    SwapIntent::Future(FutureSwap {
        from_token_id: "13".to_string(),
        from_display_symbol: "dTSLA".to_string(),
        to_token_id: "15".to_string(),
        to_display_symbol: "DUSD".to_string(),
        amount: dec("2"),
        source_balance: Some(dec("3")),
        is_source_loan_token,
        oracle_price_text: "+5%".to_string(),
        execution_block: 1_000,
        estimated_fee: dec("0.0001"),
    })
}

#[tokio::test]
async fn test_instant_swap_signs_composite_swap() -> Result<()> {
    let h = harness();
    let broadcasts = Arc::new(AtomicUsize::new(0));
    let counter = broadcasts.clone();

    let outcome = h.submission.submit(
        &instant_swap(),
        10,
        Some(Box::new(move |_: &BroadcastReceipt| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );
    assert!(matches!(outcome, SubmitOutcome::Queued(_)));

    let entries = h.queue.pending_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Swapping Token");
    assert_eq!(
        entries[0].description.as_deref(),
        Some("Swapping 100.00000000 DFI to 50.00000000 dETH")
    );
    assert_eq!(
        entries[0].drawer_messages.preparing.as_deref(),
        Some("Preparing to swap tokens…")
    );
    assert_eq!(entries[0].drawer_messages.waiting.as_deref(), Some("Swapping tokens…"));

    let receipt = h.queue.process_next().await?.expect("entry was queued");
    assert_eq!(receipt.txid, "composite-1");
    assert_eq!(receipt.complete_message.as_deref(), Some("Tokens swapped"));
    assert_eq!(broadcasts.load(Ordering::SeqCst), 1);

    let requests = h.account.composite.lock().unwrap();
    assert_eq!(requests[0].from_token_id, TokenId(0));
    assert_eq!(requests[0].to_token_id, TokenId(2));
    assert_eq!(requests[0].max_price, dec("2.02"));
    assert_eq!(
        requests[0].pools,
        vec![PoolRoute { id: TokenId(5) }, PoolRoute { id: TokenId(6) }]
    );
    Ok(())
}

#[tokio::test]
async fn test_submit_skipped_while_job_pending() -> Result<()> {
    let h = harness();

    assert!(matches!(
        h.submission.submit(&instant_swap(), 10, None),
        SubmitOutcome::Queued(_)
    ));
    assert!(matches!(
        h.submission.submit(&instant_swap(), 10, None),
        SubmitOutcome::Skipped(SkipReason::PendingJob)
    ));
    assert_eq!(h.queue.len(), 1);
    assert!(h.submission.is_submit_disabled(&instant_swap(), 10));

    h.queue.process_pending().await?;
    assert!(!h.submission.is_submit_disabled(&instant_swap(), 10));
    Ok(())
}

#[tokio::test]
async fn test_future_swap_refused_at_settlement_block() -> Result<()> {
    let h = harness();

    let outcome = h.submission.submit(&future_swap(false), 1_000, None);
    assert!(matches!(
        outcome,
        SubmitOutcome::Skipped(SkipReason::SettlementBlockReached {
            execution_block: 1_000,
            block_count: 1_000
        })
    ));
    assert!(!h.queue.has_pending_job());
    assert!(h.submission.is_submit_disabled(&future_swap(false), 1_000));
    Ok(())
}

#[tokio::test]
async fn test_loan_token_future_swap_settles_to_sentinel() -> Result<()> {
    let h = harness();

    let outcome = h.submission.submit(&future_swap(true), 999, None);
    assert!(matches!(outcome, SubmitOutcome::Queued(_)));

    let entries = h.queue.pending_entries();
    assert_eq!(entries[0].title, "Future swapping Token");
    assert_eq!(
        entries[0].drawer_messages.complete.as_deref(),
        Some("Future Swap confirmed and will be executed at block #1000")
    );
    assert_eq!(
        entries[0].drawer_messages.waiting.as_deref(),
        Some("Processing future swap transaction…")
    );

    h.queue.process_next().await?;

    let requests = h.account.future.lock().unwrap();
    assert_eq!(requests[0].owner, "0014deadbeef");
    assert_eq!(requests[0].source_token_id, TokenId(13));
    assert_eq!(requests[0].destination, TokenId(0));
    assert!(!requests[0].withdraw);
    Ok(())
}

#[tokio::test]
async fn test_construction_failure_enqueues_nothing() -> Result<()> {
    let h = harness();

    let mut intent = instant_swap();
    if let SwapIntent::Instant(swap) = &mut intent {
        swap.amount_to = Decimal::ZERO;
    }
    assert!(matches!(
        h.submission.submit(&intent, 10, None),
        SubmitOutcome::BuildFailed(WalletError::InvalidAmount(_))
    ));

    let mut intent = instant_swap();
    if let SwapIntent::Instant(swap) = &mut intent {
        swap.pools = vec!["BTC-DFI".to_string()];
    }
    assert!(matches!(
        h.submission.submit(&intent, 10, None),
        SubmitOutcome::BuildFailed(WalletError::InvalidTokenId(_))
    ));

    assert!(!h.queue.has_pending_job());
    Ok(())
}

#[tokio::test]
async fn test_submit_label_follows_broadcast_job() -> Result<()> {
    let (started_tx, started_rx) = oneshot::channel();
    let release = Arc::new(Notify::new());
    let h = harness_with(FakeBroadcaster {
        started: Mutex::new(Some(started_tx)),
        release: Some(release.clone()),
        ..Default::default()
    });

    assert_eq!(h.submission.submit_label(), "CONFIRM SWAP");

    let signer = Arc::new(wallet_swap_core::services::CompositeSwapSigner {
        from_token_id: TokenId(0),
        to_token_id: TokenId(2),
        from_amount: dec("1"),
        max_price: dec("1"),
        pools: vec![TokenId(5)],
    });
    h.queue.push(
        TransactionQueueEntry::new(signer, "Converting").with_submit_button_label("CONVERTING"),
    );
    assert_eq!(h.submission.submit_label(), "SWAPPING");

    let worker = {
        let queue = h.queue.clone();
        tokio::spawn(async move { queue.process_next().await })
    };
    started_rx.await?;

    assert!(h.queue.has_pending_broadcast_job());
    assert_eq!(
        h.queue.first_broadcast_job().map(|job| job.title),
        Some("Converting".to_string())
    );
    assert_eq!(h.submission.submit_label(), "CONVERTING");

    release.notify_one();
    worker.await??;

    assert_eq!(h.submission.submit_label(), "CONFIRM SWAP");
    assert_eq!(*h.broadcaster.sent.lock().unwrap(), vec!["composite-1"]);
    Ok(())
}

#[tokio::test]
async fn test_callback_skipped_after_leaving_screen() -> Result<()> {
    let presence = Arc::new(ScreenPresence::new());
    let account = Arc::new(FakeAccount::default());
    let broadcaster = Arc::new(FakeBroadcaster::default());
    let queue = Arc::new(TransactionQueue::new(account, broadcaster.clone()));
    let submission = SwapSubmissionService::new(queue.clone(), SwapConfig::default())
        .with_page_presence(presence.clone());

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    submission.submit(
        &instant_swap(),
        10,
        Some(Box::new(move |_: &BroadcastReceipt| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    presence.leave();
    queue.process_pending().await?;

    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(broadcaster.sent.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_preview_reports_type_and_balances() -> Result<()> {
    let h = harness();

    let preview = h.submission.preview(&instant_swap())?;
    assert_eq!(preview.swap_type.to_string(), "Swap");
    assert_eq!(preview.max_price, Some(dec("2.02")));
    // 500 - 100 - 0.0001 fee paid in DFI
    assert_eq!(preview.resulting_balances.from, dec("399.9999"));
    assert_eq!(preview.resulting_balances.to, Some(dec("50")));

    let preview = h.submission.preview(&future_swap(false))?;
    assert_eq!(preview.swap_type.to_string(), "Future swap");
    assert_eq!(preview.resulting_balances.from, dec("1"));
    assert_eq!(preview.max_price, None);
    Ok(())
}

#[tokio::test]
async fn test_missing_slippage_uses_configured_default() -> Result<()> {
    let account = Arc::new(FakeAccount::default());
    let queue = Arc::new(TransactionQueue::new(
        account.clone(),
        Arc::new(FakeBroadcaster::default()),
    ));
    let config = SwapConfig {
        default_slippage: dec("0.05"),
        ..SwapConfig::default()
    };
    let submission = SwapSubmissionService::new(queue.clone(), config);

    let mut intent = instant_swap();
    if let SwapIntent::Instant(swap) = &mut intent {
        swap.slippage = None;
    }

    // 100 / 50 * 1.05
    assert_eq!(submission.preview(&intent)?.max_price, Some(dec("2.1")));

    assert!(matches!(submission.submit(&intent, 10, None), SubmitOutcome::Queued(_)));
    queue.process_next().await?;
    assert_eq!(account.composite.lock().unwrap()[0].max_price, dec("2.1"));

    // An explicit slippage still wins over the default
    assert_eq!(submission.preview(&instant_swap())?.max_price, Some(dec("2.02")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_enqueue_once() -> Result<()> {
    for _ in 0..20 {
        let h = Arc::new(harness());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let h = h.clone();
                tokio::spawn(async move {
                    matches!(h.submission.submit(&instant_swap(), 10, None), SubmitOutcome::Queued(_))
                })
            })
            .collect();

        let mut queued = 0;
        for task in tasks {
            if task.await? {
                queued += 1;
            }
        }

        assert_eq!(queued, 1);
        assert_eq!(h.queue.len(), 1);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_queue_preserves_push_order(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
        let sent = tokio_test::block_on(async {
            let h = harness();
            let mut pushed = 0usize;

            // true pushes a swap, false processes the head entry
            for push in ops {
                if push {
                    let signer = Arc::new(wallet_swap_core::services::FutureSwapSigner {
                        source_token_id: TokenId(13),
                        amount: Decimal::from(pushed as u64 + 1),
                        destination: TokenId(15),
                    });
                    h.queue.push(TransactionQueueEntry::new(signer, format!("swap {}", pushed)));
                    pushed += 1;
                } else {
                    h.queue.process_next().await.unwrap();
                }
            }
            h.queue.process_pending().await.unwrap();

            let amounts: Vec<Decimal> = h
                .account
                .future
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.source_amount)
                .collect();
            (pushed, amounts)
        });

        let (pushed, amounts) = sent;
        let expected: Vec<Decimal> = (1..=pushed as u64).map(Decimal::from).collect();
        prop_assert_eq!(amounts, expected);
    }
}
