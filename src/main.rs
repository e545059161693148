fn main() {
    greeter::app::startup::startup();
}
