//! ERC20 token contract bindings

use alloy::sol;

sol! {
    /// ERC20 interface, trimmed to the surface the sweep path needs
    #[sol(rpc)]
    interface IERC20 {
        /// Returns the balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Transfers tokens to a recipient
        function transfer(address to, uint256 amount) external returns (bool);

        /// Emitted when tokens are transferred
        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}
