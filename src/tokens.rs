//! Static token registry.
//!
//! Maps a chain ID and token address to the token's symbol, decimals and
//! whether it is the chain's wrapped native asset. Lookups are
//! case-insensitive and never touch the network.

/// Decimals assumed for tokens that are not in the registry.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Display metadata for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    /// Ticker symbol, `None` when the token is unknown.
    pub symbol: Option<&'static str>,
    /// Number of decimals used by the token contract.
    pub decimals: u32,
    /// Whether the token is the chain's wrapped native asset (WETH, WBNB, ...).
    pub is_native: bool,
}

impl TokenInfo {
    const UNKNOWN: TokenInfo = TokenInfo {
        symbol: None,
        decimals: DEFAULT_DECIMALS,
        is_native: false,
    };
}

/// (lowercase address, symbol, decimals, is_native)
type Entry = (&'static str, &'static str, u32, bool);

const ETHEREUM: &[Entry] = &[
    ("0xdac17f958d2ee523a2206206994597c13d831ec7", "USDT", 6, false),
    ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "WETH", 18, true),
    ("0x2260fac5e5542a773aa44fbcfedf7c193bc2c599", "WBTC", 8, false),
    ("0x6b175474e89094c44da98b954eedeac495271d0f", "DAI", 18, false),
    ("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "USDC", 6, false),
    ("0xe76c6c83af64e4c60245d8c7de953df673a7a33d", "RAIL", 18, false),
];

// Binance-Peg stablecoins use 18 decimals on BSC.
const BSC: &[Entry] = &[
    ("0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c", "WBNB", 18, true),
    ("0xe9e7cea3dedca5984780bafc599bd69add087d56", "BUSD", 18, false),
    ("0x1af3f329e8be154074d8769d1ffa4ee058b1dbc3", "DAI", 18, false),
    ("0x0e09fabb73bd3ade0a17ecc321fd13a19e81ce82", "CAKE", 18, false),
    ("0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d", "USDC", 18, false),
    ("0x55d398326f99059ff775485246999027b3197955", "USDT", 18, false),
    ("0x2170ed0880ac9a755fd29b2688956bd959f933f8", "ETH", 18, false),
    ("0x7130d2a12b9bcbfae4f2634d864a1ee1ce3ead9c", "BTCB", 18, false),
    ("0x3f847b01d4d498a293e3197b186356039ecd737f", "RAILBSC", 18, false),
];

const POLYGON: &[Entry] = &[
    ("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270", "WMATIC", 18, true),
    ("0x8f3cf7ad23cd3cadbd9735aff958023239c6a063", "DAI", 18, false),
    ("0xa649325aa7c5093d12d6f98eb4378deae68ce23f", "BNB", 18, false),
    ("0x7ceb23fd6bc0add59e62ac25578270cff1b9f619", "WETH", 18, false),
    ("0x2791bca1f2de4661ed88a30c99a7a9449aa84174", "USDCe", 6, false),
    ("0x3c499c542cef5e3811e1192ce70d8cc03d5c3359", "USDC", 6, false),
    ("0xc2132d05d31c914a87c6611c10748aeb04b58e8f", "USDT", 6, false),
    ("0x1bfd67037b42cf73acf2047067bd4f2c47d9bfd6", "WBTC", 8, false),
    ("0x92a9c92c215092720c731c96d4ff508c831a714f", "RAILPOLY", 18, false),
];

const ARBITRUM: &[Entry] = &[
    ("0x912ce59144191c1204e64559fe8253a0e49e6548", "ARB", 18, false),
    ("0xfd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9", "USDT", 6, false),
    ("0xff970a61a04b1ca14834a43f5de4533ebddb5cc8", "USDCe", 6, false),
    ("0xaf88d065e77c8cc2239327c5edb3a432268e5831", "USDC", 6, false),
    ("0xda10009cbd5d07dd0cecc66161fc93d7c9000da1", "DAI", 18, false),
    ("0xfa7f8980b0f1e64a2062791cc3b0871572f1f7f0", "UNI", 18, false),
    ("0x2f2a2543b76a4166549f7aab2e75bef0aefc5b0f", "WBTC", 8, false),
    ("0x4d15a3a2286d883af0aa1b3f21367843fac63e07", "TUSD", 18, false),
    ("0x82af49447d8a07e3bd95bd0d56f35241523fbab1", "WETH", 18, true),
];

const SEPOLIA: &[Entry] = &[("0xfff9976782d46cc05630d1f6ebab18b2324d6b14", "WETH", 18, true)];

fn chain_table(chain_id: u64) -> Option<&'static [Entry]> {
    match chain_id {
        1 => Some(ETHEREUM),
        56 => Some(BSC),
        137 => Some(POLYGON),
        42161 => Some(ARBITRUM),
        11155111 => Some(SEPOLIA),
        _ => None,
    }
}

/// Resolves a token on a chain.
///
/// Unknown chains and unknown addresses resolve to 18 decimals, not native,
/// without a symbol.
pub fn resolve(chain_id: u64, token_address: &str) -> TokenInfo {
    let normalized = token_address.to_lowercase();

    chain_table(chain_id)
        .and_then(|entries| entries.iter().find(|(address, ..)| *address == normalized))
        .map(|&(_, symbol, decimals, is_native)| TokenInfo {
            symbol: Some(symbol),
            decimals,
            is_native,
        })
        .unwrap_or(TokenInfo::UNKNOWN)
}
