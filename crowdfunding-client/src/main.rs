fn main() {
    crowdfunding_client::launch();
}
