use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::model::{DailyWalletActivity, TransferEvent};

/// Cohort-style wallet growth: per day, how many distinct addresses were
/// active, how many were seen for the first time, and how many have been
/// seen in total through that day.
///
/// Both sides of every transfer count as activity; set semantics make a
/// self-transfer count its address once. Days without transfers produce
/// no row.
pub fn aggregate_wallet_activity(
    transfers: &[TransferEvent],
) -> Vec<DailyWalletActivity> {
    let mut daily_wallets: BTreeMap<NaiveDate, HashSet<&str>> =
        BTreeMap::new();

    for transfer in transfers {
        let wallets = daily_wallets
            .entry(transfer.timestamp.date_naive())
            .or_default();
        wallets.insert(transfer.from_address.as_str());
        wallets.insert(transfer.to_address.as_str());
    }

    let mut seen: HashSet<&str> = HashSet::new();

    daily_wallets
        .into_iter()
        .map(|(date, wallets)| {
            let active_wallets = wallets.len() as i64;
            let mut new_wallets = 0;

            for wallet in wallets {
                if seen.insert(wallet) {
                    new_wallets += 1;
                }
            }

            DailyWalletActivity {
                date,
                unique_wallet_count: seen.len() as i64,
                new_wallets,
                active_wallets,
            }
        })
        .collect()
}
