mod basic_solve_test;
