mod common;


#[cfg(test)]
mod test_move_usage;

#[cfg(test)]
mod test_turn_order;
