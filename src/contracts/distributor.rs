//! Token distributor contract bindings

use alloy::sol;

sol! {
    /// Airdrop token distributor interface
    #[sol(rpc)]
    interface ITokenDistributor {
        /// Claims the caller's owed tokens
        function claim() external;

        /// Returns the amount still claimable by an address
        function claimableTokens(address who) external view returns (uint256);

        /// Emitted when an address claims its allocation
        event HasClaimed(address indexed recipient, uint256 amount);
    }
}
